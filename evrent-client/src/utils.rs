use std::io::{self, BufRead, Write};

/// Prompts on stdout and reads one trimmed line from stdin.
pub fn read_input(name: &str) -> String {
    print!("{name}: ");
    let _ = io::stdout().flush();

    let mut value = String::new();
    let _ = io::stdin().lock().read_line(&mut value);
    value.trim().to_string()
}

/// Same as [`read_input`] without echoing what is typed.
pub fn read_input_hidden(name: &str) -> String {
    rpassword::prompt_password(format!("{name}: ")).unwrap_or_default()
}

/// Asks a y/n question. Anything but `y` counts as no.
pub fn confirm(question: &str) -> bool {
    read_input(&format!("{question} (y/n)")).eq_ignore_ascii_case("y")
}
