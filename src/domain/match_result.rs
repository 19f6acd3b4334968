/// One ranked hit from a sign matcher, before asset URLs are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub id: String,
    pub gloss: String,
    pub video_file: String,
    pub thumbnail: String,
    pub duration_ms: u32,
    pub score: f32,
}
