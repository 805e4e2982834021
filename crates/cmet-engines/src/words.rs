//! Whitespace word tokens used for engine budgets

pub fn split(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn join(words: &[&str]) -> String {
    words.join(" ")
}
