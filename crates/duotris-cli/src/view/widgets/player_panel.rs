use std::iter;

use duotris_engine::{PlayerId, PlayerSession};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

/// What the side panel of one player shows.
pub(crate) struct PanelData<'a> {
    pub(crate) player: PlayerId,
    pub(crate) session: &'a PlayerSession,
    pub(crate) level: u32,
}

/// Score, level and remaining quota of one player.
pub(crate) struct PlayerPanel<'a> {
    data: PanelData<'a>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PlayerPanel<'a> {
    pub(crate) fn new(data: PanelData<'a>) -> Self {
        Self { data, block: None }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

type RowValue = &'static dyn Fn(&PanelData<'_>) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(RowValue),
    LabelValue(&'static str, RowValue),
}

/// Remaining clears of `size` lines, always two digits.
fn quota(data: &PanelData<'_>, size: usize) -> String {
    format!("{:02}", data.session.quota().remaining(size))
}

const ROWS: &[Row] = &[
    Row::FullValue(&|data| data.player.to_string()),
    Row::Empty,
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|data| data.session.stats().score().to_string()),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|data| data.level.to_string()),
    Row::LabelValue("LINES:", &|data| {
        data.session.stats().total_cleared_lines().to_string()
    }),
    Row::LabelValue("PIECES:", &|data| {
        data.session.stats().completed_pieces().to_string()
    }),
    Row::Empty,
    Row::FullLabel("QUOTA:"),
    Row::LabelValue("SINGLE", &|data| quota(data, 1)),
    Row::LabelValue("DOUBLE", &|data| quota(data, 2)),
    Row::LabelValue("TRIPLE", &|data| quota(data, 3)),
    Row::LabelValue("TETRIS", &|data| quota(data, 4)),
];

impl Widget for PlayerPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(&self.data), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(&self.data), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
