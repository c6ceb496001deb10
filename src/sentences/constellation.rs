use core::fmt;

/// Constellation family derived from the two-letter talker id.
///
/// `GN` talkers mix satellites from several systems, which the NEO-M9N
/// emits whenever more than one constellation contributes to the fix.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Constellation {
    Gps,
    Glonass,
    Galileo,
    Beidou,
    /// Combined multi-GNSS solution (`GN` talker).
    Mixed,
    /// Talker not recognised; the sentence can never validate.
    #[default]
    Invalid,
}

impl Constellation {
    /// Derives the constellation from a talker id (`GP`, `GL`, ...).
    /// `BD` is the legacy BeiDou talker some firmware still emits.
    pub fn from_talker(talker: &str) -> Self {
        match talker {
            "GP" => Constellation::Gps,
            "GL" => Constellation::Glonass,
            "GA" => Constellation::Galileo,
            "GB" | "BD" => Constellation::Beidou,
            "GN" => Constellation::Mixed,
            _ => Constellation::Invalid,
        }
    }

    /// Derives the constellation from a full `TTSSS` header field.
    pub fn from_header(header: &str) -> Self {
        match header.get(..2) {
            Some(talker) => Self::from_talker(talker),
            None => Constellation::Invalid,
        }
    }
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Constellation::Gps => write!(f, "GPS"),
            Constellation::Glonass => write!(f, "GLONASS"),
            Constellation::Galileo => write!(f, "Galileo"),
            Constellation::Beidou => write!(f, "BeiDou"),
            Constellation::Mixed => write!(f, "Mixed"),
            Constellation::Invalid => write!(f, "Invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn talker_mapping() {
        assert_eq!(Constellation::from_talker("GP"), Constellation::Gps);
        assert_eq!(Constellation::from_talker("GL"), Constellation::Glonass);
        assert_eq!(Constellation::from_talker("GA"), Constellation::Galileo);
        assert_eq!(Constellation::from_talker("GB"), Constellation::Beidou);
        assert_eq!(Constellation::from_talker("BD"), Constellation::Beidou);
        assert_eq!(Constellation::from_talker("GN"), Constellation::Mixed);
        assert_eq!(Constellation::from_talker("XX"), Constellation::Invalid);
    }

    #[test]
    fn header_mapping() {
        assert_eq!(Constellation::from_header("GNGLL"), Constellation::Mixed);
        assert_eq!(Constellation::from_header("G"), Constellation::Invalid);
    }
}
