const ROOT_PREFIX: &str = "TRAPMAP";

pub(crate) mod svg {
    use std::{env, path};

    const GROUP_PREFIX: &str = "SVG";

    pub(crate) fn output_path() -> Option<path::PathBuf> {
        const KEY: &str = "OUTPUT_PATH";
        let key = format!("{}_{}_{}", super::ROOT_PREFIX, GROUP_PREFIX, KEY);

        env::var(key).ok().map(path::PathBuf::from)
    }

    pub(crate) fn show_labels() -> bool {
        // Note the show/hide inversion
        const KEY: &str = "HIDE_LABELS";
        let key = format!("{}_{}_{}", super::ROOT_PREFIX, GROUP_PREFIX, KEY);

        env::var(key).is_err()
    }
}
