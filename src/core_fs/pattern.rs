/// Compares a file name against a glob pattern with `?` and `*` wildcards.
///
/// `?` matches exactly one character, `*` any run of characters. A `*`
/// followed only by wildcards accepts the rest of the name outright, any
/// other `*` is resolved by backtracking over every split point of the
/// remaining name, so
/// patterns with many separated `*` are exponential in the worst case. File
/// names on the flash filesystem are short, which keeps this acceptable.
pub fn matches(name: &str, pattern: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    match_from(&name, &pattern)
}

fn match_from(name: &[char], pattern: &[char]) -> bool {
    let mut ni = 0;
    let mut pi = 0;

    while pi < pattern.len() && ni < name.len() {
        if name[ni] == pattern[pi] || pattern[pi] == '?' {
            ni += 1;
            pi += 1;
        } else if pattern[pi] == '*' {
            if only_wildcards(&pattern[pi..]) {
                return true;
            }
            let rest = &pattern[pi + 1..];
            return (ni..=name.len()).any(|start| match_from(&name[start..], rest));
        } else {
            return false;
        }
    }

    ni == name.len() && only_stars(&pattern[pi..])
}

fn only_stars(pattern: &[char]) -> bool {
    pattern.iter().all(|&c| c == '*')
}

// Once a `*` is reached with nothing but wildcards left, the rest of the name
// is accepted whatever its length.
fn only_wildcards(pattern: &[char]) -> bool {
    pattern.iter().all(|&c| c == '*' || c == '?')
}
