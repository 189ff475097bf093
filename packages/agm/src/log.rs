pub mod targets {
    pub const CODEC: &str = "codec";
    pub const RESOLUTION: &str = "resolution";
    pub const TRUTH_TABLE: &str = "truth table";
    pub const EXPANSION: &str = "expansion";
    pub const CONTRACTION: &str = "contraction";
    pub const REVISION: &str = "revision";
    pub const REPAIR: &str = "repair";
    pub const POSTULATES: &str = "postulates";
    pub const PARTIAL_MEET: &str = "partial meet";
}
