use crate::model::markers::Marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Flag {
    LowKrecCopies,
    HighKrecDelta,
    LowTrecCopies,
    HighTrecDelta,
}

impl Flag {
    pub fn low_copies(marker: Marker) -> Option<Flag> {
        match marker {
            Marker::Krec => Some(Flag::LowKrecCopies),
            Marker::Trec => Some(Flag::LowTrecCopies),
            Marker::Rnp => None,
        }
    }

    pub fn high_delta(marker: Marker) -> Option<Flag> {
        match marker {
            Marker::Krec => Some(Flag::HighKrecDelta),
            Marker::Trec => Some(Flag::HighTrecDelta),
            Marker::Rnp => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Flag::LowKrecCopies => "low_krec_copies",
            Flag::HighKrecDelta => "high_krec_delta",
            Flag::LowTrecCopies => "low_trec_copies",
            Flag::HighTrecDelta => "high_trec_delta",
        }
    }
}

pub fn flag_order() -> &'static [Flag] {
    &[
        Flag::LowKrecCopies,
        Flag::HighKrecDelta,
        Flag::LowTrecCopies,
        Flag::HighTrecDelta,
    ]
}
