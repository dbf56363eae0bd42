//! Reading-time estimate for a post body.

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Minutes needed to read `body` at `words_per_minute`, rounded up, never below one.
pub fn reading_time(body: &str, words_per_minute: u32) -> u32 {
    let words = body.split_whitespace().count() as u32;
    let wpm = words_per_minute.max(1);
    words.div_ceil(wpm).max(1)
}
