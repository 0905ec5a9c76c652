use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A theme category on allhackathons.com, rendered as its URL slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Theme {
    Ai,
    Api,
    Art,
    ArVr,
    Audio,
    Beginner,
    BigData,
    Blockchain,
    Databases,
    Design,
    Devops,
    Education,
    Energy,
    Enterprise,
    Fintech,
    Friendly,
    Games,
    Health,
    Industry,
    Iot,
    LowNoCode,
    MachineLearning,
    Media,
    Metaverse,
    Mobile,
    Nft,
    NonProfit,
    Quantum,
    Retail,
    Robotics,
    Science,
    Security,
    Social,
    Transport,
    Video,
    Wearables,
    Web,
    Remote,
}

/// The status labels a listing card can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum Status {
    Upcoming,
    Open,
    Ended,
}
