//! Case-insensitive literal word masking.
//!
//! Text is handled as a sequence of `char`s and folded one character at a
//! time, so a match always spans exactly as many characters as the word and
//! the masked output has the same character count as the input.

/// Folds a character to its lowercase form when that form is a single char.
///
/// Characters whose lowercase expands to several chars (e.g. `'İ'`) are kept
/// as they are so that positions in the folded text line up with the original.
pub(crate) fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

pub(crate) fn fold(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// True if the folded text contains any of the words, folded the same way.
pub fn contains_any_word(text: &str, words: &[String]) -> bool {
    let folded = fold(text);
    words
        .iter()
        .filter(|word| !word.is_empty())
        .any(|word| folded.contains(&fold(word)))
}

/// Finds the next folded occurrence of `needle` in `haystack` at or after `from`.
fn find_folded(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| {
            window
                .iter()
                .zip(needle)
                .all(|(&h, &n)| fold_char(h) == n)
        })
        .map(|offset| from + offset)
}

/// Masks every occurrence of every word, in catalog order.
///
/// For each word the scan restarts at the beginning of the text and, after a
/// hit, resumes just past the freshly written mask, so masked spans are never
/// rescanned by the same word. Earlier words win overlapping regions because
/// a later word can only match what is still unmasked.
pub fn mask_words(text: &str, words: &[String], mask: char) -> String {
    let mut chars: Vec<char> = text.chars().collect();

    for word in words {
        let needle: Vec<char> = word.chars().map(fold_char).collect();
        if needle.is_empty() {
            continue;
        }

        let mut cursor = 0;
        while let Some(start) = find_folded(&chars, &needle, cursor) {
            let end = start + needle.len();
            chars[start..end].iter_mut().for_each(|c| *c = mask);
            cursor = end;
        }
    }

    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn masks_every_occurrence_regardless_of_case() {
        let out = mask_words("Heck, HECK and heck", &words(&["heck"]), '*');
        assert_eq!(out, "****, **** and ****");
    }

    #[test]
    fn adjacent_occurrences_are_both_masked() {
        assert_eq!(mask_words("abab", &words(&["ab"]), '#'), "####");
    }

    #[test]
    fn earlier_word_wins_the_overlap() {
        // "hello" claims the region first; "llo w" can no longer match inside it.
        let out = mask_words("hello world", &words(&["hello", "llo w"]), '*');
        assert_eq!(out, "***** world");
    }

    #[test]
    fn keeps_character_count_with_multibyte_text() {
        let input = "Ärger über DARN ärger";
        let out = mask_words(input, &words(&["ärger"]), '*');
        assert_eq!(out, "***** über DARN *****");
        assert_eq!(out.chars().count(), input.chars().count());
    }

    #[test]
    fn mask_is_not_rematched_when_word_contains_mask() {
        let out = mask_words("a**b", &words(&["*"]), '*');
        assert_eq!(out, "a**b");
    }

    #[test]
    fn word_longer_than_text_is_ignored() {
        assert_eq!(mask_words("hi", &words(&["heck"]), '*'), "hi");
    }

    #[test]
    fn contains_any_word_is_case_insensitive() {
        assert!(contains_any_word("What the HeCk", &words(&["heck"])));
        assert!(!contains_any_word("What the deck", &words(&["heck"])));
        assert!(!contains_any_word("anything", &words(&[""])));
    }

    #[test]
    fn fold_keeps_expanding_characters() {
        assert_eq!(fold_char('A'), 'a');
        assert_eq!(fold_char('İ'), 'İ');
    }
}
