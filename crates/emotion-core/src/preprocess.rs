//! Text normalization: case-folding, contraction expansion, punctuation and
//! whitespace collapsing. The output is a fixed point of `process`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "am not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("i'd", "i would"),
    ("i'll", "i will"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("isn't", "is not"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("shouldn't", "should not"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what's", "what is"),
    ("where's", "where is"),
    ("who's", "who is"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

static CONTRACTION_RE: Lazy<Regex> = Lazy::new(|| {
    let alt = CONTRACTIONS
        .iter()
        .map(|(c, _)| regex::escape(c))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alt})\b")).unwrap()
});

static EXCLAIM_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!{2,}").unwrap());
static QUESTION_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?{2,}").unwrap());
static DOT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{3,}").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap());
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());
static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").unwrap());

fn expand_contraction(word: &str) -> &'static str {
    CONTRACTIONS
        .iter()
        .find(|(c, _)| *c == word)
        .map(|(_, e)| *e)
        .unwrap_or_default()
}

/// Text normalizer. The default configuration runs exactly the four core steps;
/// `strip_web_artifacts` additionally drops URLs, e-mails and mentions and unwraps hashtags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preprocessor {
    pub strip_web_artifacts: bool,
}

impl Preprocessor {
    pub fn new(strip_web_artifacts: bool) -> Self {
        Self { strip_web_artifacts }
    }

    pub fn process(&self, text: &str) -> String {
        let mut s = text.to_lowercase();
        if self.strip_web_artifacts {
            s = strip_web(s);
        }
        let s = CONTRACTION_RE.replace_all(&s, |caps: &Captures| expand_contraction(&caps[0]));
        let s = EXCLAIM_RUN_RE.replace_all(&s, "!");
        let s = QUESTION_RUN_RE.replace_all(&s, "?");
        let s = DOT_RUN_RE.replace_all(&s, "...");
        let s = WHITESPACE_RE.replace_all(&s, " ");
        s.trim().to_string()
    }
}

/// Normalize with the default configuration.
pub fn preprocess(text: &str) -> String {
    Preprocessor::default().process(text)
}

// Repeats until nothing changes: unwrapping a hashtag can expose a new URL.
// Every effective pass shortens the string, so this terminates.
fn strip_web(mut s: String) -> String {
    loop {
        let next = strip_web_once(&s);
        if next == s {
            return s;
        }
        s = next;
    }
}

fn strip_web_once(s: &str) -> String {
    let s = URL_RE.replace_all(s, "");
    let s = EMAIL_RE.replace_all(&s, "");
    let s = MENTION_RE.replace_all(&s, "");
    HASHTAG_RE.replace_all(&s, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_exclamations() {
        assert_eq!(preprocess("I am so HAPPY and excited!!!"), "i am so happy and excited!");
    }

    #[test]
    fn expands_contractions() {
        assert_eq!(preprocess("I can't believe this"), "i cannot believe this");
        assert_eq!(
            preprocess("I can't believe it's that amazing!"),
            "i cannot believe it is that amazing!"
        );
        assert_eq!(
            preprocess("I'm REALLY excited!!! This is AMAZING!!!"),
            "i am really excited! this is amazing!"
        );
    }

    #[test]
    fn contractions_match_whole_words_only() {
        assert_eq!(preprocess("scan't"), "scan't");
        assert_eq!(preprocess("don'tcha"), "don'tcha");
        assert_eq!(preprocess("(won't)"), "(will not)");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(preprocess("what??? no!!"), "what? no!");
        assert_eq!(preprocess("wait....."), "wait...");
        assert_eq!(preprocess("wait..."), "wait...");
        assert_eq!(preprocess("end.."), "end..");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(preprocess("  a \t\n b   c  "), "a b c");
        assert_eq!(preprocess(""), "");
        assert_eq!(preprocess(" \n\t "), "");
    }

    #[test]
    fn idempotent_on_samples() {
        for text in [
            "I'm REALLY excited!!! This is AMAZING!!!",
            "Don't   you   dare....  ",
            "?!?!!!???",
            "We've been waiting...... for ages",
            "ÜBER straße",
            "",
        ] {
            let once = preprocess(text);
            assert_eq!(preprocess(&once), once, "input: {text:?}");
        }
    }

    #[test]
    fn web_artifacts_are_kept_by_default() {
        let out = preprocess("see https://example.com #Happy");
        assert!(out.contains("https://example.com"));
        assert!(out.contains("#happy"));
    }

    #[test]
    fn strips_web_artifacts_when_enabled() {
        let p = Preprocessor::new(true);
        let out = p.process("Check https://example.com and mail test@example.com @bob #Happy!!");
        assert_eq!(out, "check and mail happy!");
        assert_eq!(p.process(&out), out);
    }

    #[test]
    fn web_stripping_reaches_a_fixed_point() {
        let p = Preprocessor::new(true);
        let out = p.process("h#ttps://x.y ok");
        assert_eq!(out, "ok");
        assert_eq!(p.process(&out), out);
    }
}
