use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

pub(crate) type KeyBinding<'a> = (&'a [&'a str], &'a str);

/// Labelled line of key bindings, e.g. one per player.
pub(crate) type KeyBindingGroup<'a> = (&'a str, &'a [KeyBinding<'a>]);

#[derive(Debug)]
pub(crate) struct KeyBindingDisplay<'a> {
    groups: &'a [KeyBindingGroup<'a>],
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub(crate) fn new(groups: &'a [KeyBindingGroup<'a>]) -> Self {
        Self {
            groups,
            block: None,
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn height(&self) -> u16 {
        u16::try_from(self.groups.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

const GROUP_STYLE: Style = Style::new().fg(Color::Yellow);
const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);
const ITEM_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

fn group_line<'a>((label, bindings): KeyBindingGroup<'a>) -> Line<'a> {
    let mut spans = vec![Span::styled(label, GROUP_STYLE), Span::from("  ")];
    for (i, (keys, desc)) in bindings.iter().copied().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", ITEM_SEPARATOR_STYLE));
        }
        for (i, key) in keys.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
            }
            spans.push(Span::styled(key, KEY_STYLE));
        }
        spans.push(Span::from(" "));
        spans.push(Span::styled(desc, DESCRIPTION_STYLE));
    }
    Line::from(spans).centered()
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let text: Text<'_> = self.groups.iter().copied().map(group_line).collect();
        text.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_line_text() {
        const BINDINGS: &[KeyBinding<'static>] = &[(&["a", "d"], "move"), (&["w"], "rotate")];
        let line = group_line(("P1", BINDINGS));
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "P1  a/d move | w rotate");
    }
}
