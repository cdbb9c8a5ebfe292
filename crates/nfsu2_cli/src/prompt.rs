use std::io::{self, BufRead, Write};
use std::str::FromStr;

use nfsu2_core::PerformanceMode;

use crate::edits::{EditPlan, money_edit};

pub const MONEY_PROMPT: &str = "New Money(-1 to not change): ";

fn car_prompt(car_number: usize) -> String {
    format!("Change performance of car {car_number}? (0 Nill, 1 Max, 2 No effect): ")
}

/// Prompts until a line parses as `T`. Returns `None` once input is exhausted.
fn prompt_parsed<T, R, W>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<Option<T>>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if let Ok(value) = line.trim().parse::<T>() {
            return Ok(Some(value));
        }
    }
}

/// Asks for a new money amount and a performance choice for every used car
/// slot. End of input leaves every field not yet answered unchanged.
pub fn collect_edits<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    used_slots: &[usize],
) -> io::Result<EditPlan> {
    let mut plan = EditPlan::default();

    let Some(money) = prompt_parsed::<i32, _, _>(input, output, MONEY_PROMPT)? else {
        writeln!(output)?;
        return Ok(plan);
    };
    writeln!(output)?;
    plan.money = money_edit(i64::from(money));

    for (position, &slot) in used_slots.iter().enumerate() {
        let prompt = car_prompt(position + 1);
        let Some(choice) = prompt_parsed::<i64, _, _>(input, output, &prompt)? else {
            writeln!(output)?;
            break;
        };
        if let Some(mode) = PerformanceMode::from_choice(choice) {
            plan.cars.push((slot, mode));
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use nfsu2_core::PerformanceMode;

    use super::*;

    fn run(input: &str, used_slots: &[usize]) -> (EditPlan, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let plan = collect_edits(&mut reader, &mut output, used_slots).expect("prompt io");
        (plan, String::from_utf8(output).expect("utf-8 output"))
    }

    #[test]
    fn reprompts_until_money_parses() {
        let (plan, output) = run("lots\n\n99999999999\n 2500 \n", &[]);
        assert_eq!(plan.money, Some(2500));
        assert_eq!(output.matches(MONEY_PROMPT).count(), 4);
    }

    #[test]
    fn sentinel_and_non_positive_money_leave_value_unchanged() {
        assert_eq!(run("-1\n", &[]).0.money, None);
        assert_eq!(run("0\n", &[]).0.money, None);
        assert_eq!(run("-300\n", &[]).0.money, None);
    }

    #[test]
    fn car_choices_map_to_used_slots() {
        let (plan, output) = run("-1\n1\nnope\n7\n0\n", &[0, 2, 4]);
        assert_eq!(plan.money, None);
        assert_eq!(
            plan.cars,
            vec![(0, PerformanceMode::Max), (4, PerformanceMode::Nill)]
        );
        assert!(output.contains("Change performance of car 1?"));
        assert!(output.contains("Change performance of car 3?"));
        assert!(!output.contains("car 4?"));
    }

    #[test]
    fn end_of_input_stops_prompting() {
        let (plan, output) = run("", &[0, 1]);
        assert!(plan.is_empty());
        assert!(!output.contains("Change performance"));

        let (plan, _) = run("100\n1\n", &[0, 1]);
        assert_eq!(plan.money, Some(100));
        assert_eq!(plan.cars, vec![(0, PerformanceMode::Max)]);
    }
}
