#[macro_use]
extern crate tracing;

mod logging;

use crate::logging::init_logging;
use pico_gui::{
    settings::SETTINGS_FILE_NAME,
    Gui,
    GuiSettings,
    DefaultTheme,
    InputSnapshot,
    MouseButton,
    Orientation,
    WidgetId,
    WidgetTree,
    Tween,
    Tweener,
    WidgetProperty,
    Easing,
    Repeat,
};
use graphics::{
    Font,
    FrameContent,
    Pixmap,
};
use std::{
    cell::Cell,
    env::args,
    path::Path,
    rc::Rc,
    time::Duration,
};
use anyhow::*;
use vek::*;


const CLI_INTRO: &'static str = r#"pico_demo: drives a sample GUI with scripted mouse input."#;

const CLI_HELP: &'static str = r#"
Examples:

    [this command]
    Run the script and save the last frame to pico_demo.png.

    [this command] --settings=gui_settings.json --font=font.png --out=frame.png
    Run with explicit options. A missing settings file means default settings.

    [this command] --write-settings
    Also write the settings in use back to the settings file.

    [this command] --log=log
    Also write logs to a file.

    [this command] --dump-draw-calls
    Log the draw calls of the last frame.

Env var examples:
    RUST_LOG=pico_gui=trace
    Changes logging levels"#;

const WIDTH: i32 = 320;
const HEIGHT: i32 = 240;

const FRAME_TIME: Duration = Duration::from_millis(100);


fn main() {
    println!("{}", CLI_INTRO);
    let args = args().collect::<Vec<_>>();
    if args.get(1).map(String::as_str) == Some("--help") {
        println!("{}", CLI_HELP);
        return;
    }

    if let Err(e) = init_logging(arg(&args, "--log=").map(Path::new)) {
        eprintln!("{:?}", e);
        return;
    }
    if let Err(e) = run(&args) {
        error!("{:?}", e);
    }
}

// value of the first `prefix`-prefixed arg
fn arg<'a>(args: &'a [String], prefix: &str) -> Option<&'a str> {
    args.iter()
        .filter_map(|arg| arg.strip_prefix(prefix))
        .next()
}

/// Handles of the widgets the script interacts with.
struct DemoWidgets {
    greet: WidgetId,
    sound: WidgetId,
    reset: WidgetId,
    volume: WidgetId,
    marquee: WidgetId,
}

fn run(args: &[String]) -> Result<()> {
    let settings_path = arg(args, "--settings=").unwrap_or(SETTINGS_FILE_NAME);
    let settings = GuiSettings::read(settings_path);
    if args.iter().any(|arg| arg == "--write-settings") {
        settings.write(settings_path)?;
        info!(path = %settings_path, "wrote settings");
    }
    let font = match arg(args, "--font=") {
        Some(path) => Font::load(path)?,
        None => Font::blank(),
    };
    let out = arg(args, "--out=").unwrap_or("pico_demo.png");

    let mut gui = Gui::with_settings(WIDTH, HEIGHT, &settings);
    gui.set_theme(DefaultTheme::new(settings.colors, font));
    let widgets = build_gui(&mut gui)?;

    // callbacks can't reach the tree, so they raise a flag the loop acts on
    let reset_requested = Rc::new(Cell::new(false));
    subscribe(&mut gui, &widgets, &reset_requested)?;

    let mut tweener = Tweener::new();
    let marquee = Tween::from_current(
            gui.widgets(),
            widgets.marquee,
            WidgetProperty::X,
            WIDTH - 30,
            Duration::from_secs(2),
        )
        .context("marquee widget has no x position")?
        .with_easing(Easing::SineInOut)
        .with_repeat(Repeat::Reflect);
    tweener.add(marquee);

    let mut screen = Pixmap::new(WIDTH as u32, HEIGHT as u32);
    for (frame, input) in script().iter().enumerate() {
        trace!(frame, x = input.cursor.x, y = input.cursor.y, "frame");
        gui.update(input);
        if reset_requested.replace(false) {
            reset(&mut gui, &widgets);
        }
        tweener.advance(gui.widgets_mut(), FRAME_TIME);
        gui.render(&mut screen);
    }

    let volume = gui.widgets().slider(widgets.volume).map(|s| s.value());
    let sound = gui.widgets().checkbox(widgets.sound).map(|c| c.checked());
    info!(?volume, ?sound, "script finished");

    if args.iter().any(|arg| arg == "--dump-draw-calls") {
        let mut frame = FrameContent::new();
        gui.widgets().draw(&mut frame, gui.theme());
        info!("widget tree:\n{}", outline(gui.widgets(), gui.root()));
        info!("draw calls of last frame:\n{}", frame.to_pseudo_xml());
    }

    screen.save(out)?;
    info!(path = %out, "saved last frame");
    Ok(())
}

// a panel holding a column of: a button, a row with a checkbox and a button,
// and a slider; plus a checkbox sliding along the bottom edge
fn build_gui(gui: &mut Gui) -> Result<DemoWidgets> {
    let root = gui.root();
    let tree = gui.widgets_mut();

    let panel = tree.add_panel(root, "panel")?;
    if let Some(base) = tree.base_mut(panel) {
        base.set_pos(Vec2::new(10, 10));
        base.set_size(Extent2::new(WIDTH - 20, HEIGHT - 40));
    }

    let column = tree.add_vertical_container(panel, "column")?;
    let greet = tree.add_button(column, "greet", "Hello")?;
    let row = tree.add_horizontal_container(column, "row")?;
    if let Some(row) = tree.container_mut(row) {
        row.set_stretch_items(false);
    }
    let sound = tree.add_checkbox(row, "sound")?;
    let reset = tree.add_button(row, "reset", "Reset")?;
    let volume = tree.add_slider(column, "volume", 0, 100, 5, Orientation::Horizontal)?;

    let marquee = tree.add_checkbox(root, "marquee")?;
    if let Some(base) = tree.base_mut(marquee) {
        base.set_pos(Vec2::new(10, HEIGHT - 25));
    }

    debug!(widgets = tree.len(), "built gui");
    Ok(DemoWidgets {
        greet,
        sound,
        reset,
        volume,
        marquee,
    })
}

fn subscribe(
    gui: &mut Gui,
    widgets: &DemoWidgets,
    reset_requested: &Rc<Cell<bool>>,
) -> Result<()> {
    let tree = gui.widgets_mut();

    tree.button_mut(widgets.greet)
        .context("greet is not a button")?
        .on_clicked(|| info!("hello!"));

    let reset_requested = Rc::clone(reset_requested);
    tree.button_mut(widgets.reset)
        .context("reset is not a button")?
        .on_clicked(move || reset_requested.set(true));

    let sound = tree.checkbox_mut(widgets.sound)
        .context("sound is not a checkbox")?;
    sound.on_checked(|| info!("sound on"));
    sound.on_unchecked(|| info!("sound off"));

    tree.slider_mut(widgets.volume)
        .context("volume is not a slider")?
        .on_value_changed(|volume| info!(volume, "volume changed"));

    Ok(())
}

fn reset(gui: &mut Gui, widgets: &DemoWidgets) {
    info!("resetting");
    let tree = gui.widgets_mut();
    if let Some(sound) = tree.checkbox_mut(widgets.sound) {
        sound.set_checked(false);
    }
    if let Some(volume) = tree.slider_mut(widgets.volume) {
        volume.set_value(0);
    }
}

// indented listing of the widgets under `id`, one per line
fn outline(tree: &WidgetTree, id: WidgetId) -> String {
    let mut out = String::new();
    outline_into(tree, id, "root", 0, &mut out);
    out
}

fn outline_into(tree: &WidgetTree, id: WidgetId, name: &str, depth: usize, out: &mut String) {
    let widget = match tree.get(id) {
        Some(widget) => widget,
        None => return,
    };
    let rect = widget.base().local_rect();
    out.push_str(&format!(
        "{:indent$}{} ({}) at {},{} size {}x{}\n",
        "", name, widget.kind_name(), rect.x, rect.y, rect.w, rect.h,
        indent = depth * 4,
    ));
    if let Some(container) = widget.as_container() {
        for (child_name, &child) in container.child_ids().into_iter().zip(container.children()) {
            outline_into(tree, child, child_name, depth + 1, out);
        }
    }
}

// scripted mouse input, one snapshot per frame
fn script() -> Vec<InputSnapshot> {
    let up = |x, y| InputSnapshot::at(x, y);
    let down = |x, y| InputSnapshot::at(x, y).with_button(MouseButton::Left);
    vec![
        up(0, 0),
        // click the greet button
        up(100, 40),
        down(100, 40),
        up(100, 40),
        // toggle the checkbox
        up(35, 100),
        down(35, 100),
        up(35, 100),
        // drag the slider
        down(160, 170),
        down(200, 170),
        down(250, 170),
        up(250, 170),
        // click reset
        up(100, 110),
        down(100, 110),
        up(100, 110),
        // drag the slider again and release outside it
        down(60, 170),
        down(120, 230),
        up(120, 230),
        up(0, 0),
    ]
}
