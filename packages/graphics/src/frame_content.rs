//! A drawing surface which records draw calls instead of executing them.

use crate::{
    surface::{
        DrawSurface,
        TargetId,
    },
    font::Font,
};
use vek::*;


/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    SetColor(Rgb<u8>),
    FillRect(Rect<i32, i32>),
    DrawRect(Rect<i32, i32>),
    HLine {
        x1: i32,
        x2: i32,
        y: i32,
    },
    BeginClip(Rect<i32, i32>),
    EndClip,
    Text {
        pos: Vec2<i32>,
        text: String,
    },
    CreateTarget {
        target: TargetId,
        size: Extent2<i32>,
    },
    DestroyTarget(TargetId),
    BeginTarget(TargetId),
    EndTarget,
    Clear,
    DrawTarget {
        target: TargetId,
        pos: Vec2<i32>,
    },
}

/// Recorded sequence of draw calls.
#[derive(Debug, Clone, Default)]
pub struct FrameContent {
    pub calls: Vec<DrawCall>,
    next_target: u32,
}

impl FrameContent {
    pub fn new() -> Self {
        Default::default()
    }

    fn push(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    /// Drain the recorded calls, keeping target id allocation state.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of recorded calls matching `pred`.
    pub fn count<F: FnMut(&DrawCall) -> bool>(&self, mut pred: F) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    /// Render the recorded calls as indented pseudo-XML, for debugging.
    pub fn to_pseudo_xml(&self) -> String {
        use std::fmt::Write;

        const INDENT: &'static str = "    ";

        let mut buf = String::new();
        let mut tag_stack: Vec<&'static str> = Vec::new();

        fn indent(buf: &mut String, depth: usize) {
            for _ in 0..depth {
                buf.push_str(INDENT);
            }
        }

        fn close(buf: &mut String, tag_stack: &mut Vec<&'static str>, tag: &'static str) {
            // unbalanced end gets a marker instead of a closing tag
            if tag_stack.last() == Some(&tag) {
                tag_stack.pop();
                indent(buf, tag_stack.len());
                let _ = writeln!(buf, "</{}>", tag);
            } else {
                indent(buf, tag_stack.len());
                let _ = writeln!(buf, "<unmatched-end-{}/>", tag);
            }
        }

        for call in &self.calls {
            match call {
                DrawCall::EndClip => {
                    close(&mut buf, &mut tag_stack, "clip");
                    continue;
                }
                DrawCall::EndTarget => {
                    close(&mut buf, &mut tag_stack, "target");
                    continue;
                }
                _ => (),
            }
            indent(&mut buf, tag_stack.len());
            let _ = match call {
                &DrawCall::SetColor(Rgb { r, g, b }) =>
                    writeln!(&mut buf, "<color rgb=\"{},{},{}\"/>", r, g, b),
                &DrawCall::FillRect(r) =>
                    writeln!(&mut buf, "<fill rect=\"{},{},{},{}\"/>", r.x, r.y, r.w, r.h),
                &DrawCall::DrawRect(r) =>
                    writeln!(&mut buf, "<outline rect=\"{},{},{},{}\"/>", r.x, r.y, r.w, r.h),
                &DrawCall::HLine { x1, x2, y } =>
                    writeln!(&mut buf, "<hline x=\"{}..={}\" y=\"{}\"/>", x1, x2, y),
                &DrawCall::BeginClip(r) => {
                    tag_stack.push("clip");
                    writeln!(&mut buf, "<clip rect=\"{},{},{},{}\">", r.x, r.y, r.w, r.h)
                }
                &DrawCall::Text { pos, ref text } =>
                    writeln!(&mut buf, "<text pos=\"{},{}\">{}</text>", pos.x, pos.y, text),
                &DrawCall::CreateTarget { target, size } =>
                    writeln!(&mut buf, "<create-target id=\"{}\" size=\"{},{}\"/>", target.0, size.w, size.h),
                &DrawCall::DestroyTarget(target) =>
                    writeln!(&mut buf, "<destroy-target id=\"{}\"/>", target.0),
                &DrawCall::BeginTarget(target) => {
                    tag_stack.push("target");
                    writeln!(&mut buf, "<target id=\"{}\">", target.0)
                }
                &DrawCall::Clear => writeln!(&mut buf, "<clear/>"),
                &DrawCall::DrawTarget { target, pos } =>
                    writeln!(&mut buf, "<blit id=\"{}\" pos=\"{},{}\"/>", target.0, pos.x, pos.y),
                &DrawCall::EndClip | &DrawCall::EndTarget => unreachable!(),
            };
        }
        while let Some(tag) = tag_stack.pop() {
            indent(&mut buf, tag_stack.len());
            let _ = writeln!(&mut buf, "</{}>", tag);
        }
        buf
    }
}

impl DrawSurface for FrameContent {
    fn set_color(&mut self, color: Rgb<u8>) {
        self.push(DrawCall::SetColor(color));
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.push(DrawCall::FillRect(Rect::new(x, y, w, h)));
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.push(DrawCall::DrawRect(Rect::new(x, y, w, h)));
    }

    fn draw_h_line(&mut self, x1: i32, x2: i32, y: i32) {
        self.push(DrawCall::HLine { x1, x2, y });
    }

    fn begin_clip(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.push(DrawCall::BeginClip(Rect::new(x, y, w, h)));
    }

    fn end_clip(&mut self) {
        self.push(DrawCall::EndClip);
    }

    fn draw_text(&mut self, x: i32, y: i32, _font: &Font, text: &str) {
        self.push(DrawCall::Text {
            pos: Vec2::new(x, y),
            text: text.to_owned(),
        });
    }

    fn create_target(&mut self, w: i32, h: i32) -> TargetId {
        let target = TargetId(self.next_target);
        self.next_target += 1;
        self.push(DrawCall::CreateTarget {
            target,
            size: Extent2::new(w, h),
        });
        target
    }

    fn destroy_target(&mut self, target: TargetId) {
        self.push(DrawCall::DestroyTarget(target));
    }

    fn begin_target(&mut self, target: TargetId) {
        self.push(DrawCall::BeginTarget(target));
    }

    fn end_target(&mut self) {
        self.push(DrawCall::EndTarget);
    }

    fn clear(&mut self) {
        self.push(DrawCall::Clear);
    }

    fn draw_target(&mut self, target: TargetId, x: i32, y: i32) {
        self.push(DrawCall::DrawTarget {
            target,
            pos: Vec2::new(x, y),
        });
    }
}


#[test]
fn records_calls_in_order() {
    let mut frame = FrameContent::new();
    let target = frame.create_target(64, 32);
    frame.begin_target(target);
    frame.set_color(Rgb::new(1, 2, 3));
    frame.fill_rect(0, 0, 4, 4);
    frame.end_target();
    frame.draw_target(target, 0, 0);

    assert_eq!(frame.calls, vec![
        DrawCall::CreateTarget { target: TargetId(0), size: Extent2::new(64, 32) },
        DrawCall::BeginTarget(TargetId(0)),
        DrawCall::SetColor(Rgb::new(1, 2, 3)),
        DrawCall::FillRect(Rect::new(0, 0, 4, 4)),
        DrawCall::EndTarget,
        DrawCall::DrawTarget { target: TargetId(0), pos: Vec2::new(0, 0) },
    ]);
    assert_eq!(frame.count(|call| matches!(call, DrawCall::FillRect(_))), 1);
}

#[test]
fn pseudo_xml_nests_clips() {
    let mut frame = FrameContent::new();
    frame.begin_clip(0, 0, 10, 10);
    frame.draw_h_line(0, 9, 5);
    frame.begin_clip(1, 1, 8, 8);
    frame.clear();
    frame.end_clip();
    frame.end_clip();

    let xml = frame.to_pseudo_xml();
    assert_eq!(
        xml,
        "<clip rect=\"0,0,10,10\">\n    \
        <hline x=\"0..=9\" y=\"5\"/>\n    \
        <clip rect=\"1,1,8,8\">\n        \
        <clear/>\n    \
        </clip>\n\
        </clip>\n",
    );
}

#[test]
fn pseudo_xml_survives_unbalanced_end() {
    let mut frame = FrameContent::new();
    frame.end_target();
    assert_eq!(frame.to_pseudo_xml(), "<unmatched-end-target/>\n");
}
