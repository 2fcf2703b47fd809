#![no_main]

use libfuzzer_sys::fuzz_target;
use tidyname_core::{compute_new_name, split_extension, Capitalization, RenameConfig};

const MODES: [Capitalization; 5] = [
    Capitalization::None,
    Capitalization::Title,
    Capitalization::Sentence,
    Capitalization::Upper,
    Capitalization::Lower,
];

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte picks the rules, the rest is "name\nkeyword"
    let flags = data[0];
    let input = String::from_utf8_lossy(&data[1..]);
    let (name, keyword) = input.split_once('\n').unwrap_or((&input, ""));

    let config = RenameConfig {
        replace_underscores: flags & 1 != 0,
        remove_keyword: keyword.chars().take(20).collect(),
        case_sensitive_keyword: flags & 2 != 0,
        capitalization: MODES[usize::from(flags >> 2) % MODES.len()],
    };

    let new_name = compute_new_name(name, &config);
    let (_, extension) = split_extension(name);
    assert!(new_name.ends_with(extension));
});
