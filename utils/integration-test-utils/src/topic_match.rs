/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

/// AMQP topic matching: `*` matches exactly one word, `#` zero or more.
pub fn topic_matches(pattern: &str, routing_key: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('.').collect();
    let key: Vec<&str> = routing_key.split('.').collect();
    match_words(&pattern, &key)
}

fn match_words(pattern: &[&str], key: &[&str]) -> bool {
    match pattern.split_first() {
        None => key.is_empty(),
        Some((&"#", rest)) => (0..=key.len()).any(|skip| match_words(rest, &key[skip..])),
        Some((&word, rest)) => match key.split_first() {
            Some((&first, key_rest)) => (word == "*" || word == first) && match_words(rest, key_rest),
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::topic_matches;

    #[test]
    fn exact_and_single_word_wildcards() {
        assert!(topic_matches("stasis.app.a", "stasis.app.a"));
        assert!(!topic_matches("stasis.app.a", "stasis.app.b"));
        assert!(topic_matches("stasis.app.*", "stasis.app.a"));
        assert!(!topic_matches("stasis.*", "stasis.app.a"));
    }

    #[test]
    fn hash_matches_zero_or_more_words() {
        assert!(topic_matches("ami.#", "ami.dial"));
        assert!(topic_matches("ami.#", "ami"));
        assert!(topic_matches("#", "stasis.channel.dial"));
        assert!(topic_matches("stasis.#.dial", "stasis.channel.dial"));
        assert!(!topic_matches("ami.#", "stasis.channel.dial"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!topic_matches("stasis.app.myapp", "stasis.app.MyApp"));
    }
}
