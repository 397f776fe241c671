pub const USER_SESSION_COOKIE_NAME: &str = "user_session";

// Quiz session limits
pub const QUESTION_TIME_LIMIT_SECS: u32 = 10;
pub const MIN_QUESTION_COUNT: u32 = 1;
pub const MAX_QUESTION_COUNT: u32 = 50;
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

// Preference values
pub const DIFFICULTIES: &[&str] = &["any", "easy", "medium", "hard"];
pub const DEFAULT_DIFFICULTY: &str = "any";

/// Notification hours offered by the client, 24h clock. -1 means "when available".
pub const NOTIFICATION_HOURS: &[i64] = &[8, 10, 12, 14, 16, 18, 20, -1];
pub const NO_NOTIFICATION: i64 = -1;

pub const AVATARS: &[&str] = &[
    "default", "avatar_1", "avatar_2", "avatar_3", "avatar_4", "avatar_5", "avatar_6", "avatar_7",
];
pub const DEFAULT_AVATAR: &str = "default";

/// Trivia categories as (provider category id, display name).
pub const CATEGORIES: &[(u32, &str)] = &[
    (9, "General Knowledge"),
    (10, "Books"),
    (11, "Film"),
    (12, "Music"),
    (13, "Musicals & Theatres"),
    (14, "Television"),
    (15, "Video Games"),
    (16, "Board Games"),
    (17, "Science & Nature"),
    (18, "Computers"),
    (19, "Mathematics"),
    (20, "Mythology"),
    (21, "Sports"),
    (22, "Geography"),
    (23, "History"),
    (24, "Politics"),
    (25, "Art"),
    (26, "Celebrities"),
    (27, "Animals"),
    (28, "Vehicles"),
    (29, "Comics"),
    (30, "Gadgets"),
    (31, "Anime & Manga"),
    (32, "Cartoons & Animations"),
];

pub fn is_known_category(id: u32) -> bool {
    CATEGORIES.iter().any(|(cid, _)| *cid == id)
}
