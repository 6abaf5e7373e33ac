use crate::console::{Console, ConsoleResult};
use pdm_core::evaluate;
use std::io::{BufRead, Write};

const EXIT_WORDS: &[&str] = &["exit", "quit"];

pub(super) fn run<R: BufRead, W: Write>(console: &mut Console<R, W>) -> ConsoleResult<()> {
    console.say("")?;
    console.say("Calculator: enter an expression, or `exit` to go back.")?;
    loop {
        let line = console.ask("calc> ")?;
        let expression = line.trim();
        if EXIT_WORDS
            .iter()
            .any(|word| expression.eq_ignore_ascii_case(word))
        {
            return Ok(());
        }
        if expression.is_empty() {
            continue;
        }
        match evaluate(expression) {
            Ok(value) => console.say(format!("= {value}"))?,
            Err(err) => console.say(format!("Error: {err}"))?,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::menu::tests::drive;
    use pdm_core::StorageConfig;

    #[test]
    fn evaluates_until_exit() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::in_dir(dir.path());

        let text = drive(
            &storage,
            "5\n2 + 3 * 4\n\n7 // 2\n1 / 0\n__import__('os')\nQUIT\n6\n",
        );

        assert!(text.contains("= 14\n"));
        assert!(text.contains("= 3\n"));
        assert!(text.contains("Error: division by zero"));
        assert!(text.contains("Error: unexpected character `_` at position 0"));
        assert!(text.contains("Goodbye."));
    }
}
