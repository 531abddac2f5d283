//! Rule-based English lemmatizer.
//!
//! Reduces inflected forms to a base form using an irregular-form table plus
//! plural and verbal suffix rules. Rules are applied until the word stops
//! changing, so every output is a fixpoint: lemmatizing a lemma returns it
//! unchanged.

use std::collections::{HashMap, HashSet};

/// Irregular forms and words that look inflected but are not.
/// Every value must itself be a fixpoint of the rules below.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    // be / have / do / go
    ("is", "be"),
    ("am", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    // irregular verbs common in resumes
    ("led", "lead"),
    ("built", "build"),
    ("wrote", "write"),
    ("written", "write"),
    ("taught", "teach"),
    ("thought", "think"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("sought", "seek"),
    ("ran", "run"),
    ("began", "begin"),
    ("begun", "begin"),
    ("made", "make"),
    ("making", "make"),
    ("took", "take"),
    ("taken", "take"),
    ("taking", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("knew", "know"),
    ("known", "know"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("won", "win"),
    ("held", "hold"),
    ("kept", "keep"),
    ("met", "meet"),
    ("sent", "send"),
    ("spent", "spend"),
    ("found", "find"),
    ("got", "get"),
    ("gotten", "get"),
    ("saw", "see"),
    ("seen", "see"),
    ("told", "tell"),
    ("sold", "sell"),
    ("paid", "pay"),
    ("used", "use"),
    ("using", "use"),
    ("uses", "use"),
    // irregular plurals
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("criteria", "criterion"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("caches", "cache"),
    ("niches", "niche"),
    // invariant words the suffix rules would damage
    ("series", "series"),
    ("species", "species"),
    ("news", "news"),
    ("lens", "lens"),
    ("analytics", "analytics"),
    ("statistics", "statistics"),
    ("mathematics", "mathematics"),
    ("physics", "physics"),
    ("economics", "economics"),
    ("kubernetes", "kubernetes"),
    ("pandas", "pandas"),
    ("postgres", "postgres"),
    ("jenkins", "jenkins"),
    ("devops", "devops"),
    ("windows", "windows"),
    ("rails", "rails"),
    ("nodejs", "nodejs"),
    ("reactjs", "reactjs"),
    ("vuejs", "vuejs"),
    ("nextjs", "nextjs"),
];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    protected: HashSet<String>,
}

impl Lemmatizer {
    pub fn english() -> Self {
        Self {
            irregular: IRREGULAR_FORMS.iter().copied().collect(),
            protected: HashSet::new(),
        }
    }

    /// Marks words that must never be reduced (e.g. every word of the skill catalog).
    pub fn protecting<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.protected
            .extend(words.into_iter().map(|w| w.as_ref().to_string()));
        self
    }

    /// Returns the lemma of a lowercase word. Non-ASCII input is returned unchanged.
    pub fn lemmatize(&self, word: &str) -> String {
        let mut current = word.to_string();
        if !current.is_ascii() {
            return current;
        }

        loop {
            if self.protected.contains(&current) {
                return current;
            }
            let next = match self.irregular.get(current.as_str()) {
                Some(base) => (*base).to_string(),
                None => match reduce_suffix(&current) {
                    Some(reduced) => reduced,
                    None => return current,
                },
            };
            if next == current {
                return current;
            }
            current = next;
        }
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

/// Applies the first matching suffix rule. Every rule strictly shortens the word.
fn reduce_suffix(word: &str) -> Option<String> {
    if word.len() <= 3 {
        return None;
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 3 {
            return Some(format!("{stem}y"));
        }
    }
    if let Some(stem) = word.strip_suffix("ied") {
        if stem.len() >= 3 {
            return Some(format!("{stem}y"));
        }
    }
    for suffix in ["sses", "shes", "ches", "xes", "zzes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is")
    {
        return Some(word[..word.len() - 1].to_string());
    }
    if let Some(stem) = word.strip_suffix("ing") {
        if stem.len() >= 3 && has_vowel(stem) {
            return Some(restore_stem(stem));
        }
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if !word.ends_with("eed") && stem.len() >= 3 && has_vowel(stem) {
            return Some(restore_stem(stem));
        }
    }
    None
}

/// Fixes up a stem left behind by `-ing` / `-ed` removal:
/// "runn" -> "run", "solv" -> "solve", "creat" -> "create", "bas" -> "base".
fn restore_stem(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    let last = bytes[n - 1];
    let prev = bytes[n - 2];

    if last == prev && !is_vowel(last) {
        if matches!(last, b'l' | b's' | b'z') || n < 4 {
            return stem.to_string();
        }
        return stem[..n - 1].to_string();
    }

    let wants_e = matches!(last, b'v' | b'z')
        || stem.ends_with("at")
        || stem.ends_with("bl")
        || stem.ends_with("ag")
        || stem.ends_with("uc")
        || stem.ends_with("rc")
        || stem.ends_with("ac")
        || is_short_cvc(bytes);

    if wants_e {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

fn is_short_cvc(bytes: &[u8]) -> bool {
    bytes.len() == 3
        && !is_vowel(bytes[0])
        && is_vowel(bytes[1])
        && !is_vowel(bytes[2])
        && !matches!(bytes[2], b'w' | b'x' | b'y')
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

fn has_vowel(stem: &str) -> bool {
    stem.bytes().any(is_vowel)
}
