use super::Node;

use colored::{Color, Colorize};

const INDENT: usize = 2;

/// Group the digits of a number by thousands, eg: 1234567 -> "1,234,567"
pub fn comma(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Text rendering of a tree: one entry per line, two spaces of indentation per
/// level, directories as `name/`, files as `name size`
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    /// Style names and numbers with terminal colors
    pub color: bool,
    /// Close every directory with its dirs/files/size totals
    pub totals: bool,
}

impl Renderer {
    fn styled<S: std::string::ToString>(&self, text: S, color: Color) -> String {
        match self.color {
            true => text.to_string().color(color).to_string(),
            false => text.to_string(),
        }
    }

    pub fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        self.render_rec(node, 0, &mut out);
        out
    }

    fn render_rec(&self, node: &Node, indent: usize, out: &mut String) {
        let pad = " ".repeat(indent);
        match node.children() {
            None => {
                out.push_str(&format!(
                    "{pad}{} {}\n",
                    self.styled(node.name(), Color::Yellow),
                    self.styled(comma(node.size().unwrap_or_default()), Color::Blue),
                ));
            }
            Some(children) => {
                out.push_str(&format!("{pad}{}/\n", self.styled(node.name(), Color::Cyan)));
                for child in children {
                    self.render_rec(child, indent + INDENT, out);
                }
                if self.totals {
                    let lines = [
                        ("dirs", node.dir_count()),
                        ("files", node.file_count()),
                        ("total size", node.total_size()),
                    ];
                    for (label, value) in lines {
                        let line = format!("{pad}| {label:>10}: {}", comma(value));
                        out.push_str(&self.styled(line, Color::Red));
                        out.push('\n');
                    }
                }
            }
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Renderer::default().render(self))
    }
}
