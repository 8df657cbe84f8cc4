use crate::domain::model::SelectOption;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Prints a 1-based numbered list of options and reads selections until one
/// is in range. Returns the zero-based index of the chosen option.
///
/// Re-prompts indefinitely on non-numeric or out-of-range input; the only
/// error path is the input stream ending or an output write failing.
pub fn select_from_list<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    heading: &str,
    options: &[SelectOption],
) -> Result<usize> {
    writeln!(output, "{}", heading)?;
    for (idx, option) in options.iter().enumerate() {
        writeln!(output, "{}. {}", idx + 1, option.label)?;
    }

    loop {
        write!(output, "Enter the number of the project you want to fetch data for: ")?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        if read == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before a selection was made",
            )
            .into());
        }

        match line.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => return Ok(n - 1),
            _ => writeln!(output, "Invalid selection. Please try again.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("11", "Silicon City"),
            SelectOption::new("12", "Crystal Homes"),
        ]
    }

    #[test]
    fn test_valid_selection_is_one_based() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        let idx = select_from_list(&mut input, &mut output, "Available Projects:", &options())
            .unwrap();
        assert_eq!(idx, 1);

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("1. Silicon City"));
        assert!(printed.contains("2. Crystal Homes"));
    }

    #[test]
    fn test_reprompts_on_invalid_input() {
        let mut input = Cursor::new("abc\n0\n7\n1\n");
        let mut output = Vec::new();
        let idx = select_from_list(&mut input, &mut output, "Available Projects:", &options())
            .unwrap();
        assert_eq!(idx, 0);

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("Invalid selection").count(), 3);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let result = select_from_list(&mut input, &mut output, "Available Projects:", &options());
        assert!(result.is_err());
    }
}
