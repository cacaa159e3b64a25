use ratatui::layout::Rect;

/// Logical rows of the editor grid, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Row {
    Button = 0,
    Proc = 1,
    LinkChannels = 2,
}

const ROWS: [Row; 3] = [Row::Button, Row::Proc, Row::LinkChannels];

#[derive(Debug, Clone, PartialEq)]
pub struct Cell<T> {
    pub row: Row,
    pub col: usize,
    pub col_span: usize,
    pub item: T,
}

/// A grid of `columns` equal columns and three logical rows.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    columns: usize,
    cells: Vec<Cell<T>>,
}

impl<T> Grid<T> {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            cells: Vec::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn add(&mut self, row: Row, col: usize, col_span: usize, item: T) {
        assert!(
            col + col_span <= self.columns,
            "cell at column {col} spanning {col_span} exceeds {} columns",
            self.columns
        );
        self.cells.push(Cell {
            row,
            col,
            col_span,
            item,
        });
    }

    pub fn cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    pub fn row(&self, row: Row) -> impl Iterator<Item = &Cell<T>> {
        self.cells.iter().filter(move |c| c.row == row)
    }

    /// Left edge of column `col` within `width` cells.
    fn column_x(&self, col: usize, width: u16) -> u16 {
        if self.columns == 0 {
            return 0;
        }
        (width as usize * col / self.columns) as u16
    }

    /// Place every cell in `area`, in the same order as `cells()`.
    ///
    /// A row is as tall as its tallest cell according to `height`; rows
    /// without cells take no space. Rects are clipped to `area`.
    pub fn layout(&self, area: Rect, height: impl Fn(&Cell<T>) -> u16) -> Vec<Rect> {
        let mut row_y = [0u16; 3];
        let mut y = area.y;
        for (i, row) in ROWS.iter().enumerate() {
            row_y[i] = y;
            let h = self.row(*row).map(&height).max().unwrap_or(0);
            y = y.saturating_add(h);
        }

        self.cells
            .iter()
            .map(|cell| {
                let top = row_y[cell.row as usize].min(area.bottom());
                let h = height(cell).min(area.bottom() - top);
                let left = self.column_x(cell.col, area.width);
                let right = self.column_x(cell.col + cell.col_span, area.width);
                Rect::new(area.x + left, top, right - left, h)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_stack_in_order() {
        let mut grid = Grid::new(6);
        grid.add(Row::LinkChannels, 0, 6, "led");
        grid.add(Row::Proc, 0, 3, "left");
        grid.add(Row::Proc, 3, 3, "right");
        grid.add(Row::Button, 0, 6, "buttons");

        let rects = grid.layout(Rect::new(0, 0, 60, 20), |c| match c.item {
            "left" => 6,
            "right" => 4,
            _ => 1,
        });
        assert_eq!(rects[3], Rect::new(0, 0, 60, 1));
        assert_eq!(rects[1], Rect::new(0, 1, 30, 6));
        assert_eq!(rects[2], Rect::new(30, 1, 30, 4));
        assert_eq!(rects[0], Rect::new(0, 7, 60, 1));
    }

    #[test]
    fn empty_rows_take_no_space() {
        let mut grid = Grid::new(1);
        grid.add(Row::Proc, 0, 1, ());
        let rects = grid.layout(Rect::new(2, 3, 10, 10), |_| 2);
        assert_eq!(rects, vec![Rect::new(2, 3, 10, 2)]);
    }

    #[test]
    fn rects_are_clipped_to_area() {
        let mut grid = Grid::new(2);
        grid.add(Row::Button, 0, 2, 0);
        grid.add(Row::Proc, 0, 2, 1);
        let rects = grid.layout(Rect::new(0, 0, 8, 3), |c| if c.item == 0 { 2 } else { 5 });
        assert_eq!(rects[1], Rect::new(0, 2, 8, 1));
    }

    #[test]
    #[should_panic(expected = "exceeds 6 columns")]
    fn cell_past_last_column_is_fatal() {
        let mut grid = Grid::new(6);
        grid.add(Row::Proc, 4, 3, ());
    }
}
