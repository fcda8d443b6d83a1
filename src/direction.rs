//! Fixed command catalog
//!
//! Hat directions and trim commands, with the host identifiers they resolve to.

/// Identifier of the plugin-owned "hold to trim" command
pub const HOLD_COMMAND: &str = "amyinorbit/trimhat/trim";

/// Description shown for [`HOLD_COMMAND`] in the simulator's binding UI
pub const HOLD_DESCRIPTION: &str = "hold for pitch/yaw trim";

/// Hat switch direction
///
/// Order matters: it is the index used to bind each hat handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatDirection {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    DownLeft,
    DownRight,
    UpRight,
}

impl HatDirection {
    /// Number of hat directions
    pub const COUNT: usize = 8;

    /// All directions, in index order
    pub const ALL: [HatDirection; Self::COUNT] = [
        HatDirection::Up,
        HatDirection::Down,
        HatDirection::Left,
        HatDirection::Right,
        HatDirection::UpLeft,
        HatDirection::DownLeft,
        HatDirection::DownRight,
        HatDirection::UpRight,
    ];

    /// Stable index (0..8)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a direction by index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Host command this direction is normally bound to
    pub fn command_name(self) -> &'static str {
        match self {
            HatDirection::Up => "sim/general/hat_switch_up",
            HatDirection::Down => "sim/general/hat_switch_down",
            HatDirection::Left => "sim/general/hat_switch_left",
            HatDirection::Right => "sim/general/hat_switch_right",
            HatDirection::UpLeft => "sim/general/hat_switch_up_left",
            HatDirection::DownLeft => "sim/general/hat_switch_down_left",
            HatDirection::DownRight => "sim/general/hat_switch_down_right",
            HatDirection::UpRight => "sim/general/hat_switch_up_right",
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            HatDirection::UpLeft
                | HatDirection::DownLeft
                | HatDirection::DownRight
                | HatDirection::UpRight
        )
    }

    /// Trim command driven by this direction, or `None` for diagonals
    ///
    /// `reverse` swaps the pitch axis only; rudder is never reversed.
    pub fn trim(self, reverse: bool) -> Option<TrimCommand> {
        match (self, reverse) {
            (HatDirection::Up, false) | (HatDirection::Down, true) => Some(TrimCommand::PitchDown),
            (HatDirection::Down, false) | (HatDirection::Up, true) => Some(TrimCommand::PitchUp),
            (HatDirection::Left, _) => Some(TrimCommand::RudderLeft),
            (HatDirection::Right, _) => Some(TrimCommand::RudderRight),
            _ => None,
        }
    }
}

/// Simulator trim command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimCommand {
    PitchDown,
    PitchUp,
    RudderLeft,
    RudderRight,
}

impl TrimCommand {
    /// Number of trim commands
    pub const COUNT: usize = 4;

    /// All trim commands, in index order
    pub const ALL: [TrimCommand; Self::COUNT] = [
        TrimCommand::PitchDown,
        TrimCommand::PitchUp,
        TrimCommand::RudderLeft,
        TrimCommand::RudderRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Host command identifier
    pub fn command_name(self) -> &'static str {
        match self {
            TrimCommand::PitchDown => "sim/flight_controls/pitch_trim_down",
            TrimCommand::PitchUp => "sim/flight_controls/pitch_trim_up",
            TrimCommand::RudderLeft => "sim/flight_controls/rudder_trim_left",
            TrimCommand::RudderRight => "sim/flight_controls/rudder_trim_right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, dir) in HatDirection::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
            assert_eq!(HatDirection::from_index(i), Some(*dir));
        }
        assert_eq!(HatDirection::from_index(HatDirection::COUNT), None);
    }

    #[test]
    fn test_default_mapping() {
        assert_eq!(HatDirection::Up.trim(false), Some(TrimCommand::PitchDown));
        assert_eq!(HatDirection::Down.trim(false), Some(TrimCommand::PitchUp));
        assert_eq!(HatDirection::Left.trim(false), Some(TrimCommand::RudderLeft));
        assert_eq!(HatDirection::Right.trim(false), Some(TrimCommand::RudderRight));
    }

    #[test]
    fn test_reverse_swaps_pitch_only() {
        assert_eq!(HatDirection::Up.trim(true), Some(TrimCommand::PitchUp));
        assert_eq!(HatDirection::Down.trim(true), Some(TrimCommand::PitchDown));
        assert_eq!(HatDirection::Left.trim(true), Some(TrimCommand::RudderLeft));
        assert_eq!(HatDirection::Right.trim(true), Some(TrimCommand::RudderRight));
    }

    #[test]
    fn test_diagonals_have_no_trim() {
        let diagonals: Vec<_> = HatDirection::ALL
            .into_iter()
            .filter(|d| d.is_diagonal())
            .collect();
        assert_eq!(diagonals.len(), 4);
        for dir in diagonals {
            assert_eq!(dir.trim(false), None);
            assert_eq!(dir.trim(true), None);
        }
    }

    #[test]
    fn test_command_names_are_unique() {
        let mut names: Vec<_> = HatDirection::ALL
            .iter()
            .map(|d| d.command_name())
            .chain(TrimCommand::ALL.iter().map(|t| t.command_name()))
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), HatDirection::COUNT + TrimCommand::COUNT);
    }
}
