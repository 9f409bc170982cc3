/// Slot receiving the row component for each axis (X=0, Y=1, Z=2).
pub const PR: [usize; 3] = [1, 2, 0];
/// Slot receiving the column component for each axis.
pub const PC: [usize; 3] = [2, 0, 1];
/// Slot receiving the depth component for each axis.
pub const PD: [usize; 3] = [0, 1, 2];

/// Cardinal reference axis for row/column/depth addressing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Axis> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    /// Slot index that stores the row component when oriented on this axis.
    #[inline]
    pub const fn row_slot(self) -> usize {
        PR[self as usize]
    }

    #[inline]
    pub const fn col_slot(self) -> usize {
        PC[self as usize]
    }

    #[inline]
    pub const fn depth_slot(self) -> usize {
        PD[self as usize]
    }
}
