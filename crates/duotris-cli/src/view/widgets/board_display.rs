use std::iter;

use duotris_engine::{Board, Piece, ScreenWipe};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Text,
    widgets::{Block as BlockWidget, BlockExt, Paragraph, Widget},
};

use crate::view::widgets::{BlockDisplay, Palette, style};

/// One player's board: locked cells, the falling piece, the wipe bands and
/// an optional centred message.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    board: &'a Board,
    palette: Palette,
    falling_piece: Option<Piece>,
    wipe: Option<ScreenWipe>,
    message: Option<Text<'a>>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(board: &'a Board, palette: Palette) -> Self {
        Self {
            board,
            palette,
            falling_piece: None,
            wipe: None,
            message: None,
            block: None,
        }
    }

    pub(crate) fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub(crate) fn wipe(self, wipe: ScreenWipe) -> Self {
        Self {
            wipe: Some(wipe),
            ..self
        }
    }

    pub(crate) fn message(self, message: impl Into<Text<'a>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        10 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        20 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut board = self.board.clone();
        if let Some(piece) = &self.falling_piece {
            board.fill_piece(piece);
        }

        let col_constraints =
            (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (y, (grid_row, row)) in iter::zip(grid_cells, board.rows()).enumerate() {
            let shade = self.wipe.and_then(|wipe| wipe.shade_at(y));
            for (grid_cell, block) in iter::zip(grid_row, row) {
                let block_display = match shade {
                    Some(shade) => BlockDisplay::from_wipe(shade),
                    None => BlockDisplay::from_block(*block, self.palette),
                };
                block_display.render(grid_cell, buf);
            }
        }

        if let Some(message) = &self.message {
            let height = u16::try_from(message.height()).unwrap_or(u16::MAX);
            let [message_area] = area.layout(&Layout::vertical([Constraint::Length(height)]).flex(Flex::Center));
            Paragraph::new(message.clone())
                .style(style::MESSAGE)
                .centered()
                .render(message_area, buf);
        }
    }
}
