use serde::Serialize;

/// Assay targets the metrics engine looks up inside a sample group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Marker {
    Rnp,
    Krec,
    Trec,
}

impl Marker {
    pub fn from_target_name(name: &str) -> Option<Marker> {
        match name {
            "RNP" => Some(Marker::Rnp),
            "KREC" => Some(Marker::Krec),
            "TREC" => Some(Marker::Trec),
            _ => None,
        }
    }

    pub fn target_name(self) -> &'static str {
        match self {
            Marker::Rnp => "RNP",
            Marker::Krec => "KREC",
            Marker::Trec => "TREC",
        }
    }
}

/// Targets normalized against RNP.
pub fn excision_circles() -> &'static [Marker] {
    &[Marker::Krec, Marker::Trec]
}
