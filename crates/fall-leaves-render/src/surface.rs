//! Presentation targets for finished frames.

use ratatui::buffer::Buffer;

use crate::Canvas;

/// Glyph whose foreground paints the top half of a cell.
const UPPER_HALF_BLOCK: &str = "▀";

/// Something a finished frame can be shown on.
pub trait Surface {
    /// Show `frame`. Called once per rendered frame with a complete canvas.
    fn present(&mut self, frame: &Canvas);
}

/// Terminal buffers show two canvas rows per cell: the upper half block's
/// foreground is the even row and its background the odd row below it.
impl Surface for Buffer {
    fn present(&mut self, frame: &Canvas) {
        let area = self.area;
        for row in 0..area.height {
            let top_y = u32::from(row) * 2;
            if top_y >= frame.height() {
                break;
            }
            for col in 0..area.width {
                let x = u32::from(col);
                let Some(top) = frame.pixel(x, top_y) else {
                    break;
                };
                let bottom = frame.pixel(x, top_y + 1).unwrap_or(top);
                if let Some(cell) = self.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF_BLOCK)
                        .set_fg(top.into())
                        .set_bg(bottom.into());
                }
            }
        }
    }
}
