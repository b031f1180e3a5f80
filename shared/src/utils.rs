/// Remove markdown code-fence markers (` ```json ` and ` ``` `) wherever they
/// appear, then trim.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// True when a line of user input is the session terminator.
pub fn is_exit_command(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("exit")
}
