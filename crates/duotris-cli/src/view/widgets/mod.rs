use duotris_engine::PlayerId;
use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub(crate) use self::{
    block_display::*, board_display::*, key_binding_display::*, player_panel::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod player_panel;

/// Block colours of one player.
///
/// Player 2 sees every piece colour darkened by 30 %, so the two boards can be
/// told apart at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Palette {
    Bright,
    Dark,
}

impl Palette {
    pub(crate) const DARKEN_PERCENT: u8 = 30;

    pub(crate) fn for_player(player: PlayerId) -> Self {
        match player {
            PlayerId::One => Self::Bright,
            PlayerId::Two => Self::Dark,
        }
    }
}

mod color {
    use duotris_engine::PieceKind;
    use ratatui::style::Color;

    use super::Palette;

    pub const I: [u8; 3] = [0x00, 0xf0, 0xf0];
    pub const O: [u8; 3] = [0xf0, 0xf0, 0x00];
    pub const T: [u8; 3] = [0xa0, 0x00, 0xf0];
    pub const L: [u8; 3] = [0xf0, 0xa0, 0x00];
    pub const J: [u8; 3] = [0x00, 0x00, 0xf0];
    pub const S: [u8; 3] = [0x00, 0xf0, 0x00];
    pub const Z: [u8; 3] = [0xf0, 0x00, 0x00];

    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(48, 48, 48);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const SILVER: Color = Color::Rgb(192, 192, 192);

    /// Subtracts `percent` of full scale from every channel, clamping at 0.
    pub const fn darken(rgb: [u8; 3], percent: u8) -> [u8; 3] {
        #[expect(clippy::cast_possible_truncation)]
        let amount = ((255 * percent as u32 + 50) / 100) as u8;
        [
            rgb[0].saturating_sub(amount),
            rgb[1].saturating_sub(amount),
            rgb[2].saturating_sub(amount),
        ]
    }

    pub const fn piece(kind: PieceKind, palette: Palette) -> Color {
        let rgb = match kind {
            PieceKind::I => I,
            PieceKind::O => O,
            PieceKind::T => T,
            PieceKind::L => L,
            PieceKind::J => J,
            PieceKind::S => S,
            PieceKind::Z => Z,
        };
        let [r, g, b] = match palette {
            Palette::Bright => rgb,
            Palette::Dark => darken(rgb, Palette::DARKEN_PERCENT),
        };
        Color::Rgb(r, g, b)
    }
}

pub mod style {
    use duotris_engine::{PieceKind, WipeShade};
    use ratatui::style::{Color, Modifier, Style};

    use super::{Palette, color};

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const MESSAGE: Style = fg_bg(color::WHITE, color::BLACK).add_modifier(Modifier::BOLD);
    pub const HINT: Style = Style::new().fg(color::GRAY);

    pub const WIPE_LEADING: Style = bg_only(color::WHITE);
    pub const WIPE_MIDDLE: Style = bg_only(color::SILVER);
    pub const WIPE_TRAILING: Style = bg_only(color::GRAY);
    pub const WIPE_CLEARED: Style = bg_only(color::BLACK);

    pub const fn piece(kind: PieceKind, palette: Palette) -> Style {
        bg_only(color::piece(kind, palette))
    }

    pub const fn wipe(shade: WipeShade) -> Style {
        match shade {
            WipeShade::Leading => WIPE_LEADING,
            WipeShade::Middle => WIPE_MIDDLE,
            WipeShade::Trailing => WIPE_TRAILING,
            WipeShade::Cleared => WIPE_CLEARED,
        }
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
