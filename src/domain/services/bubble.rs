#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

impl BubbleAlignment {
    pub fn for_role(role: Role) -> BubbleAlignment {
        if role == Role::User {
            return BubbleAlignment::Right;
        }

        return BubbleAlignment::Left;
    }
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn char_len(text: &str) -> usize {
    return text.chars().count();
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, alignment: BubbleAlignment, window_max_width: usize) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();

        let lines = self
            .message
            .as_string_lines(max_line_length)
            .into_iter()
            .map(|line| {
                return self.text_to_line(line, max_line_length);
            })
            .collect();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn text_to_line(&self, text: String, max_line_length: usize) -> Line<'static> {
        let fill = " ".repeat(max_line_length.saturating_sub(char_len(&text)));
        let formatted_line_length =
            char_len(&text) + fill.len() + Bubble::style_config().bubble_padding;
        let outer_bubble_padding =
            " ".repeat(self.window_max_width.saturating_sub(formatted_line_length));

        let wrapped_spans = vec![
            self.highlight_span("│ ".to_string()),
            Span::from(text),
            self.highlight_span(format!("{fill} │")),
        ];

        if self.alignment == BubbleAlignment::Left {
            let mut line_spans = wrapped_spans;
            line_spans.push(Span::from(outer_bubble_padding));
            return Line::from(line_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;

        let mut max_line_length = self
            .message
            .text
            .replace('\t', "  ")
            .lines()
            .map(char_len)
            .max()
            .unwrap_or(0);

        let available = self.window_max_width.saturating_sub(line_border_width).max(1);
        if max_line_length > available {
            max_line_length = available;
        }

        let title_len = char_len(&self.message.role.to_string());
        if max_line_length < title_len {
            max_line_length = title_len;
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        let title = self.message.role.to_string();
        // Add 2 for the padding on each side of the text.
        let inner_bar = "─".repeat(max_line_length + 2 - char_len(&title));
        let top_bar = format!("╭{title}{inner_bar}╮");
        let bottom_bar = format!("╰{}╯", "─".repeat(max_line_length + 2));
        let bar_bubble_padding = " ".repeat(
            self.window_max_width
                .saturating_sub(max_line_length + Bubble::style_config().bubble_padding),
        );

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(format!("{top_bar}{bar_bubble_padding}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
        } else {
            res.push(self.highlight_line(format!("{bar_bubble_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        }

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if self.message.message_type() == MessageType::Error {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Red),
                    ..Style::default()
                },
            );
        } else if self.message.role == Role::Assistant {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Rgb(255, 153, 0)),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
