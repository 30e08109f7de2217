/// Write head of a `Drawer`. Column and row are canvas cell coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenCursor {
    pub column: u16,
    pub row: u16,
}

impl ScreenCursor {
    pub fn new(column: u16, row: u16) -> ScreenCursor {
        return ScreenCursor { column, row };
    }
}
