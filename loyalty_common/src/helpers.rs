const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];
const FALSY: [&str; 4] = ["0", "false", "no", "off"];

/// Interprets an on/off setting such as an environment variable. Missing or unrecognised values yield `default`.
pub fn parse_boolean_flag<S: AsRef<str>>(value: Option<S>, default: bool) -> bool {
    value.map_or(default, |v| {
        let v = v.as_ref().trim().to_ascii_lowercase();
        if TRUTHY.contains(&v.as_str()) {
            true
        } else if FALSY.contains(&v.as_str()) {
            false
        } else {
            default
        }
    })
}
