//! Greeting text for the hello service.

use crate::constants::HELLO_STREAM_LEN;

/// Reply text for a single greeting.
pub fn hello_message(name: &str, age: i32) -> String {
    format!("Hello {name}! You are {age} years old.")
}

/// Reply texts for the streaming greeting, numbered from 1.
pub fn stream_messages(name: &str) -> Vec<String> {
    (1..=HELLO_STREAM_LEN)
        .map(|n| format!("Hello {name}, message #{n}"))
        .collect()
}

/// Current Unix time in seconds.
pub fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
