//! Reduced Porter-style stemmer.
//!
//! Only a subset of the Porter rule groups is applied, each exactly once and in
//! a fixed order: 1a, 1b, 1c, 2, 3, 4, 5a, 5b. Steps 2 and 4 know two suffixes
//! each and step 3 knows two. Index lookups depend on this exact behaviour, so
//! the missing suffix tables must stay missing.

/// Stem a word. The input is lowercased first; the empty string stems to itself.
pub fn stem(word: &str) -> String {
    let mut s = Stemmer::new(word);
    if s.word.is_empty() {
        return String::new();
    }
    s.step1a();
    s.step1b();
    s.step1c();
    s.step2();
    s.step3();
    s.step4();
    s.step5a();
    s.step5b();
    s.word.into_iter().collect()
}

struct Stemmer {
    word: Vec<char>,
}

impl Stemmer {
    fn new(word: &str) -> Self {
        Self { word: word.to_lowercase().chars().collect() }
    }

    fn len(&self) -> isize {
        self.word.len() as isize
    }

    fn char_at(&self, i: isize) -> Option<char> {
        if i < 0 {
            return None;
        }
        self.word.get(i as usize).copied()
    }

    /// A `y` following a vowel counts as a vowel. Out of range is not a consonant.
    fn is_consonant(&self, i: isize) -> bool {
        match self.char_at(i) {
            None => false,
            Some('a' | 'e' | 'i' | 'o' | 'u') => false,
            Some('y') => !(i > 0 && !self.is_consonant(i - 1)),
            Some(_) => true,
        }
    }

    /// Number of vowel-to-consonant transitions in the whole word.
    fn measure(&self) -> usize {
        let mut count = 0;
        let mut in_vowels = false;
        for i in 0..self.len() {
            if !self.is_consonant(i) {
                in_vowels = true;
            } else if in_vowels {
                count += 1;
                in_vowels = false;
            }
        }
        count
    }

    fn is_double_consonant(&self, i: isize) -> bool {
        i > 0 && self.char_at(i) == self.char_at(i - 1) && self.is_consonant(i)
    }

    fn cvc(&self, i: isize) -> bool {
        i >= 2
            && self.is_consonant(i)
            && !self.is_consonant(i - 1)
            && self.is_consonant(i - 2)
            && !matches!(self.char_at(i), Some('w' | 'x' | 'y'))
    }

    fn contains_vowel(&self) -> bool {
        (0..self.len()).any(|i| !self.is_consonant(i))
    }

    fn contains_vowel_before_last(&self) -> bool {
        (0..self.len() - 1).any(|i| !self.is_consonant(i))
    }

    fn ends_with(&self, suffix: &str) -> bool {
        let n = suffix.chars().count();
        n <= self.word.len() && self.word[self.word.len() - n..].iter().copied().eq(suffix.chars())
    }

    fn last(&self) -> Option<char> {
        self.word.last().copied()
    }

    /// Drop `n` trailing characters and append `with`.
    fn replace_tail(&mut self, n: usize, with: &str) {
        let keep = self.word.len().saturating_sub(n);
        self.word.truncate(keep);
        self.word.extend(with.chars());
    }

    fn step1a(&mut self) {
        if self.ends_with("sses") {
            self.replace_tail(4, "ss");
        } else if self.ends_with("ies") {
            self.replace_tail(3, "i");
        } else if self.word.len() > 2 && self.last() == Some('s') {
            self.word.pop();
        }
    }

    fn step1b(&mut self) {
        if self.ends_with("eed") {
            if self.measure() > 0 {
                self.replace_tail(3, "ee");
            }
        } else if (self.ends_with("ed") || self.ends_with("ing")) && self.contains_vowel() {
            let n = if self.ends_with("ed") { 2 } else { 3 };
            self.replace_tail(n, "");
            if self.ends_with("at") || self.ends_with("bl") || self.ends_with("iz") {
                self.word.push('e');
            } else if self.is_double_consonant(self.len() - 1) {
                self.word.pop();
            } else if self.measure() == 1 && self.cvc(self.len() - 1) {
                self.word.push('e');
            }
        }
    }

    fn step1c(&mut self) {
        if self.last() == Some('y') && self.contains_vowel_before_last() {
            self.word.pop();
            self.word.push('i');
        }
    }

    fn step2(&mut self) {
        if self.ends_with("ational") && self.measure() > 0 {
            self.replace_tail(7, "ate");
        } else if self.ends_with("tional") && self.measure() > 0 {
            self.replace_tail(6, "tion");
        }
    }

    fn step3(&mut self) {
        if self.ends_with("icate") && self.measure() > 0 {
            self.replace_tail(5, "ic");
        } else if self.ends_with("ative") && self.measure() > 0 {
            self.replace_tail(5, "");
        }
    }

    fn step4(&mut self) {
        if (self.ends_with("ance") || self.ends_with("ence")) && self.measure() > 1 {
            self.replace_tail(4, "");
        }
    }

    fn step5a(&mut self) {
        if self.last() == Some('e') {
            let m = self.measure();
            if m > 1 || (m == 1 && !self.cvc(self.len() - 2)) {
                self.word.pop();
            }
        }
    }

    fn step5b(&mut self) {
        if self.word.len() > 1
            && self.is_double_consonant(self.len() - 1)
            && self.measure() > 1
            && self.last() == Some('l')
        {
            self.word.pop();
        }
    }
}
