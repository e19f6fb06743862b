/// Token the dump uses in place of a space inside a headword
pub const ADDRESS_SPACE_TOKEN: char = '_';

/// Token the dump uses in place of an apostrophe inside a headword
pub const ADDRESS_APOSTROPHE_TOKEN: char = '#';

/// Length of the disambiguating suffix on variant references (e.g. `HAUS1` + `.01`)
pub const REFERENCE_SUFFIX_LEN: usize = 3;

/// Folder (below the output directory) holding one JSON file per word
pub const WORDS_FOLDER: &str = "words";

/// Progress update interval (tick every N articles)
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Buffer size for reading the dump
pub const READ_BUFFER_SIZE: usize = 256 * 1024;
