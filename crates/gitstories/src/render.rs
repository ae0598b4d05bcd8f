//! Renderer-facing draw list and a standalone SVG writer.

use std::fmt::Write as _;

use gitstories_core::{Color, FolderId, NodeKind, Point, Tree};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    Circle {
        kind: NodeKind,
        center: Point,
        radius: f64,
        color: Color,
    },
}

/// Paint order for the whole tree.
///
/// Per folder: each file's link then the file, each subfolder's link then the subfolder, and the
/// folder's own circle last so it covers the links that meet at its center.
pub fn draw_list(tree: &Tree, line_color: Color) -> Result<Vec<DrawCommand>> {
    let mut out = Vec::with_capacity(tree.len() * 2);
    if tree.contains(tree.root()) {
        draw_folder(tree, tree.root(), line_color, &mut out)?;
    }
    Ok(out)
}

enum Paint {
    Folder(FolderId),
    Link { from: Point, to: FolderId },
    FolderCircle(FolderId),
}

fn draw_folder(
    tree: &Tree,
    folder: FolderId,
    line_color: Color,
    out: &mut Vec<DrawCommand>,
) -> Result<()> {
    let mut pending = vec![Paint::Folder(folder)];
    while let Some(paint) = pending.pop() {
        match paint {
            Paint::Folder(folder) => {
                let center = tree.body(folder)?.center;
                for file in tree.files(folder)? {
                    let body = tree.body(file)?;
                    out.push(DrawCommand::Line {
                        from: center,
                        to: body.center,
                        color: line_color,
                    });
                    out.push(DrawCommand::Circle {
                        kind: NodeKind::File,
                        center: body.center,
                        radius: body.radius,
                        color: body.color,
                    });
                }
                // Popped in reverse: each subfolder's link, then its subtree, then this circle.
                pending.push(Paint::FolderCircle(folder));
                for child in tree.folders(folder)?.rev() {
                    pending.push(Paint::Folder(child));
                    pending.push(Paint::Link {
                        from: center,
                        to: child,
                    });
                }
            }
            Paint::Link { from, to } => out.push(DrawCommand::Line {
                from,
                to: tree.body(to)?.center,
                color: line_color,
            }),
            Paint::FolderCircle(folder) => {
                let body = tree.body(folder)?;
                out.push(DrawCommand::Circle {
                    kind: NodeKind::Folder,
                    center: body.center,
                    radius: body.radius,
                    color: body.color,
                });
            }
        }
    }
    Ok(())
}

/// Writes `commands` as a standalone SVG document of `width` x `height`.
pub fn render_svg(
    commands: &[DrawCommand],
    width: u32,
    height: u32,
    background: Color,
) -> String {
    let mut out = String::with_capacity(256 + commands.len() * 96);
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
    );
    let _ = write!(
        &mut out,
        r#"<rect width="100%" height="100%" fill="{}"{}/>"#,
        background.to_hex(),
        OpacityAttr("fill-opacity", background)
    );
    for cmd in commands {
        match cmd {
            DrawCommand::Line { from, to, color } => {
                let _ = write!(
                    &mut out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"{}/>"#,
                    Num(from.x),
                    Num(from.y),
                    Num(to.x),
                    Num(to.y),
                    color.to_hex(),
                    OpacityAttr("stroke-opacity", *color)
                );
            }
            DrawCommand::Circle {
                kind,
                center,
                radius,
                color,
            } => {
                let _ = write!(
                    &mut out,
                    r#"<circle class="{kind}" cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
                    Num(center.x),
                    Num(center.y),
                    Num(*radius),
                    color.to_hex(),
                    OpacityAttr("fill-opacity", *color),
                    kind = kind_class(*kind),
                );
            }
        }
    }
    out.push_str("</svg>\n");
    out
}

fn kind_class(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::File => "file",
        NodeKind::Folder => "folder",
    }
}

/// Coordinates rounded to three decimals, without `-0` or float noise.
#[derive(Debug, Clone, Copy)]
struct Num(f64);

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.0.is_finite() {
            return f.write_str("0");
        }
        let mut v = (self.0 * 1000.0).round() / 1000.0;
        if v == -0.0 {
            v = 0.0;
        }
        write!(f, "{v}")
    }
}

/// Emits the opacity attribute only for translucent colors.
struct OpacityAttr(&'static str, Color);

impl std::fmt::Display for OpacityAttr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.1.a == 255 {
            return Ok(());
        }
        write!(f, r#" {}="{}""#, self.0, Num(self.1.opacity()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitstories_core::point;

    #[test]
    fn folder_circle_follows_its_children() {
        let mut t = Tree::new("root", point(0.0, 0.0)).unwrap();
        let root = t.root();
        let dir = t.create_folder(root, "dir").unwrap();
        t.create_file(dir, "a").unwrap();
        t.create_file(root, "top").unwrap();

        let ops: Vec<&str> = draw_list(&t, Color::BLACK)
            .unwrap()
            .iter()
            .map(|c| match c {
                DrawCommand::Line { .. } => "line",
                DrawCommand::Circle {
                    kind: NodeKind::File,
                    ..
                } => "file",
                DrawCommand::Circle {
                    kind: NodeKind::Folder,
                    ..
                } => "folder",
            })
            .collect();
        assert_eq!(
            ops,
            vec!["line", "file", "line", "line", "file", "folder", "folder"]
        );
    }

    #[test]
    fn deep_chains_draw_without_recursion() {
        let mut t = Tree::new("root", point(0.0, 0.0)).unwrap();
        let mut folder = t.root();
        for i in 0..100_000 {
            folder = t.create_folder(folder, &format!("d{i}")).unwrap();
        }
        t.create_file(folder, "leaf.rs").unwrap();

        let cmds = draw_list(&t, Color::BLACK).unwrap();
        assert_eq!(cmds.len(), 2 * t.len() - 1);
        // Every link on the way down precedes the leaf; folder circles unwind after it.
        assert!(matches!(cmds[1], DrawCommand::Line { .. }));
        assert!(matches!(
            cmds.last(),
            Some(DrawCommand::Circle {
                kind: NodeKind::Folder,
                ..
            })
        ));
        let files = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::Circle { kind: NodeKind::File, .. }))
            .unwrap();
        assert_eq!(files, 100_001);
    }

    #[test]
    fn numbers_are_rounded() {
        assert_eq!(Num(1.23456).to_string(), "1.235");
        assert_eq!(Num(-0.0001).to_string(), "0");
        assert_eq!(Num(f64::NAN).to_string(), "0");
        assert_eq!(Num(640.0).to_string(), "640");
    }

    #[test]
    fn svg_has_one_element_per_command() {
        let cmds = vec![
            DrawCommand::Line {
                from: point(0.0, 0.0),
                to: point(10.0, 0.0),
                color: Color::BLACK,
            },
            DrawCommand::Circle {
                kind: NodeKind::Folder,
                center: point(0.0, 0.0),
                radius: 10.0,
                color: Color::rgba(255, 0, 0, 128),
            },
        ];
        let svg = render_svg(&cmds, 100, 50, Color::WHITE);
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert_eq!(svg.matches("<line ").count(), 1);
        let circle = r##"<circle class="folder" cx="0" cy="0" r="10" fill="#ff0000" fill-opacity="0.502"/>"##;
        assert!(svg.contains(circle));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
