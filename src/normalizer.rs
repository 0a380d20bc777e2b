//! Turns a raw, human- or OCR-supplied address string into first a `clean`ed string (still
//! human-readable, administrative prefixes and stray punctuation stripped) and then, for
//! matching purposes only, a `normalize`d key (`[a-z0-9 ]`, diacritics folded away).
//!
//! `clean` and `normalize` are pure functions of their input; nothing here touches a cache
//! directly; cached wrappers live next to the engine that owns the caches (see
//! [`crate::cache::Caches`]), since caching is a cross-cutting layer, not part of
//! any one component.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Literal substring replacements applied to the raw string, in order. Order matters whenever
/// one key is a prefix of another (e.g. "tp." vs "tp "), so this is a `Vec`, not a `HashMap`
/// .
static PREFIX_TABLE: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        // Thành phố / TP, with common diacritic and punctuation variants.
        ("Thành phố ", " "),
        ("thành phố ", " "),
        ("THÀNH PHỐ ", " "),
        ("Thanh pho ", " "),
        ("thanh pho ", " "),
        ("T.P.H.C.M", "Hồ Chí Minh"),
        ("T.P.H.C.M.", "Hồ Chí Minh"),
        ("TPHCM", "Hồ Chí Minh"),
        ("TP.HCM", "Hồ Chí Minh"),
        ("Tp.HCM", "Hồ Chí Minh"),
        ("tp.HCM", "Hồ Chí Minh"),
        ("TP HCM", "Hồ Chí Minh"),
        ("T.P. ", " "),
        ("T.P ", " "),
        ("TP. ", " "),
        ("TP ", " "),
        ("Tp. ", " "),
        ("Tp ", " "),
        ("tp. ", " "),
        ("tp ", " "),
        // Tỉnh.
        ("Tỉnh ", " "),
        ("tỉnh ", " "),
        ("TỈNH ", " "),
        ("Tinh ", " "),
        ("tinh ", " "),
        ("T. ", " "),
        // Quận.
        ("Quận ", " "),
        ("quận ", " "),
        ("QUẬN ", " "),
        ("Quan ", " "),
        ("quan ", " "),
        ("Q. ", " "),
        ("Q.", " "),
        ("q. ", " "),
        // Huyện.
        ("Huyện ", " "),
        ("huyện ", " "),
        ("HUYỆN ", " "),
        ("Huyen ", " "),
        ("huyen ", " "),
        ("H. ", " "),
        ("h. ", " "),
        // Thị trấn.
        ("Thị trấn ", " "),
        ("thị trấn ", " "),
        ("THỊ TRẤN ", " "),
        ("Thi tran ", " "),
        ("thi tran ", " "),
        ("TT. ", " "),
        ("TT ", " "),
        ("Tt. ", " "),
        // Thị xã.
        ("Thị xã ", " "),
        ("thị xã ", " "),
        ("THỊ XÃ ", " "),
        ("Thi xa ", " "),
        ("thi xa ", " "),
        ("TX. ", " "),
        ("TX ", " "),
        // Phường.
        ("Phường ", " "),
        ("phường ", " "),
        ("PHƯỜNG ", " "),
        ("Phuong ", " "),
        ("phuong ", " "),
        ("P. ", " "),
        ("p. ", " "),
        // Xã.
        ("Xã ", " "),
        ("xã ", " "),
        ("XÃ ", " "),
        ("Xa ", " "),
        ("xa ", " "),
        ("X. ", " "),
        ("x. ", " "),
        // Punctuation to whitespace.
        (",", " "),
        (".", " "),
        ("-", " "),
        ("/", " "),
        ("_", " "),
    ]
});

/// Spelling/abbreviation variants that are substituted wholesale, independent of diacritic
/// folding — e.g. "HN" for "Hà Nội", or a tone-mark spelling variant of a ward name. Applied as
/// literal substring replacement, same as [`PREFIX_TABLE`], just against whole names rather than
/// administrative-unit indicators.
static SPELLING_VARIANTS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("TPHN", "Hà Nội"),
        ("HNội", "Hà Nội"),
        ("HàNội", "Hà Nội"),
        ("HàNoi", "Hà Nội"),
        ("H N", "Hà Nội"),
        ("HN", "Hà Nội"),
        ("T T H", "Thừa Thiên Huế"),
        ("Thừa T Huế", "Thừa Thiên Huế"),
        ("TTH", "Thừa Thiên Huế"),
        ("Thanh Hoá", "Thanh Hóa"),
        ("Khánh Hoà", "Khánh Hòa"),
        ("Phan Rang", "Phan Rang-Tháp Chàm"),
        ("HaNam", "Hà Nam"),
        ("Phú Hòa", "Phú Hoà"),
        ("Tuy Hòa", "Tuy Hoà"),
        ("Biên Hoà", "Biên Hòa"),
    ]
});

/// Matches a head-anchored administrative indicator (one known token, optionally followed by
/// a period) up to the first run of whitespace. Narrower than blindly stripping "the first
/// word", since it only fires on recognized indicator spellings.
static HEAD_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(thanh\s*ph[ôo]|t\.?p|t[iỉ]nh|qu[aậ]n|huy[eệ]n|ph[uươ]ờng|ph|th[ij]\s*tr[aấ]n|th[ij]\s*x[aã]|tt|tx|x[aã]|q|p|t)\.?\s+",
    )
    .unwrap()
});

/// Ward-number pattern: "P3", "Ph 3", "Phường 3" → "3".
static WARD_NUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(ph[uươ]ờng|ph|p)\.?\s*([0-9]+)\b").unwrap());

/// District-number pattern: "Q7", "Quận 7" → "7".
static DISTRICT_NUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(qu[aậ]n|q)\.?\s*([0-9]+)\b").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Vietnamese letters that do not decompose under Unicode NFD and therefore survive a bare
/// combining-mark strip untouched. `đ`/`Đ` is the only letter in this alphabet with that
/// property; everything else (ư, ơ, ô, ê, the tone marks, …) decomposes into a base Latin
/// letter plus one or two combining marks that NFD + the `is_combining_mark` filter already
/// handles.
const NON_DECOMPOSING: &[(char, char)] = &[('đ', 'd'), ('Đ', 'D')];

/// Applies the numbered-subunit rewrite, then the literal prefix/spelling tables, then the
/// head-anchored regex, then collapses whitespace. Deterministic and pure.
pub fn clean(raw: &str) -> String {
    let mut s = raw.to_string();

    s = WARD_NUM_RE.replace_all(&s, "$2").into_owned();
    s = DISTRICT_NUM_RE.replace_all(&s, "$2").into_owned();

    for (from, to) in SPELLING_VARIANTS.iter() {
        s = s.replace(from, to);
    }
    for (from, to) in PREFIX_TABLE.iter() {
        s = s.replace(from, to);
    }

    s = HEAD_PREFIX_RE.replace(&s, "").into_owned();

    let collapsed = WHITESPACE_RE.replace_all(s.trim(), " ");
    collapsed.into_owned()
}

/// Lower-cases, folds diacritics to their ASCII base, and drops everything outside
/// `[a-z0-9 ]`.
pub fn normalize(s: &str) -> String {
    let lowered = s.to_lowercase();

    let mut folded = String::with_capacity(lowered.len());
    for c in lowered.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        folded.push(fold_non_decomposing(c));
    }

    folded
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

fn fold_non_decomposing(c: char) -> char {
    for (from, to) in NON_DECOMPOSING {
        if *from == c {
            return *to;
        }
    }
    c
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036f}' // combining diacritical marks
        | '\u{1ab0}'..='\u{1aff}'
        | '\u{1dc0}'..='\u{1dff}'
        | '\u{20d0}'..='\u{20ff}'
        | '\u{fe20}'..='\u{fe2f}'
    )
}
