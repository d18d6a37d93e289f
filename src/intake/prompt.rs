use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

use super::wizard::{IntakeWizard, Step};
use crate::assessment::{AssessmentInput, EndOfLife, MetalType, ProductionRoute};

/// Line-based question/answer helper over any reader/writer pair.
struct Prompter<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Prompter<'a, R, W> {
    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.out, "{}", message)?;
        self.out.flush().context("Failed to flush output")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Unexpected end of input");
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message).context("Failed to write output")
    }

    /// Ask until `parse` accepts the answer.
    fn ask<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Option<T>,
        hint: &str,
    ) -> Result<T> {
        loop {
            let answer = self.prompt(&format!("{}: ", message))?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => self.say(&format!("  Invalid: {}. Try again.", hint))?,
            }
        }
    }

    /// Ask for an optional value; an empty answer means "leave it to the predictor".
    fn ask_optional<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Option<T>,
        hint: &str,
    ) -> Result<Option<T>> {
        loop {
            let answer = self.prompt(&format!("{} [skip]: ", message))?;
            if answer.is_empty() {
                return Ok(None);
            }
            match parse(&answer) {
                Some(value) => return Ok(Some(value)),
                None => self.say(&format!("  Invalid: {}. Try again.", hint))?,
            }
        }
    }
}

fn number<T: FromStr>(s: &str) -> Option<T> {
    s.parse().ok()
}

fn choices<T: std::fmt::Display>(all: &[T]) -> String {
    all.iter()
        .map(|v| v.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Walk the user through the intake steps and return the finished input.
///
/// Invalid steps are reported and asked again; at the review step the
/// user can confirm, go back, or cancel.
pub fn run_intake<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<AssessmentInput> {
    let mut p = Prompter { input, out };
    let mut wizard = IntakeWizard::new();

    p.say("New assessment")?;
    p.say("==============")?;

    loop {
        let step = wizard.step();
        p.say("")?;
        p.say(&format!("Step {} of {}: {}", step.number(), Step::COUNT, step))?;

        match step {
            Step::BasicInfo => {
                let name = p.prompt("Name [none]: ")?;
                let metal_hint = format!("expected one of {}", choices(&MetalType::ALL));
                let metal = p.ask("Metal", MetalType::parse, &metal_hint)?;
                let quantity = p.ask("Quantity (kg)", number::<f64>, "expected a number")?;

                let draft = wizard.draft_mut();
                draft.name = if name.is_empty() { None } else { Some(name) };
                draft.metal_type = Some(metal);
                draft.quantity = Some(quantity);
            }
            Step::ProductionDetails => {
                let route_hint = format!("expected one of {}", choices(&ProductionRoute::ALL));
                let route = p.ask("Production route", ProductionRoute::parse, &route_hint)?;
                let recycled = p.ask_optional(
                    "Recycled content (0-1)",
                    number::<f64>,
                    "expected a number",
                )?;
                let distance = p.ask_optional(
                    "Transport distance (km)",
                    number::<f64>,
                    "expected a number",
                )?;

                let draft = wizard.draft_mut();
                draft.production_route = Some(route);
                draft.parameters.recycled_content = recycled;
                draft.parameters.transport_distance = distance;
            }
            Step::EnvironmentalData => {
                let energy =
                    p.ask_optional("Energy consumption (MJ)", number::<f64>, "expected a number")?;
                let source = p.ask_optional(
                    "Electricity source",
                    |s| Some(s.to_string()),
                    "expected text",
                )?;
                let waste =
                    p.ask_optional("Waste generation (kg)", number::<f64>, "expected a number")?;
                let end_of_life = p.ask_optional(
                    "End of life (recycling, reuse, landfill, incineration)",
                    EndOfLife::parse,
                    "expected recycling, reuse, landfill or incineration",
                )?;
                let temperature = p.ask_optional(
                    "Process temperature (°C)",
                    number::<f64>,
                    "expected a number",
                )?;

                let params = &mut wizard.draft_mut().parameters;
                params.energy_consumption = energy;
                params.electricity_source = source;
                params.waste_generation = waste;
                params.end_of_life = end_of_life;
                params.process_temperature = temperature;
            }
            Step::Review => {
                let preview = wizard.draft();
                p.say(&format!(
                    "  {} {} kg via the {} route",
                    preview.metal_type.map(|m| m.to_string()).unwrap_or_default(),
                    preview.quantity.unwrap_or_default(),
                    preview
                        .production_route
                        .map(|r| r.to_string())
                        .unwrap_or_default(),
                ))?;
                let answer = p.prompt("Save this assessment? [Y/n/b(ack)]: ")?;
                match answer.to_lowercase().as_str() {
                    "" | "y" | "yes" => return wizard.finish().map_err(anyhow::Error::from),
                    "b" | "back" => {
                        wizard.back();
                        continue;
                    }
                    "n" | "no" => bail!("Intake cancelled"),
                    _ => {
                        p.say("  Please answer y, n or b.")?;
                        continue;
                    }
                }
            }
        }

        if let Err(e) = wizard.next() {
            p.say(&format!("  {}", e))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<AssessmentInput>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = run_intake(&mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_happy_path() {
        // name, metal, quantity | route, recycled, distance | 5 skips | confirm
        let script = "Smelter A\naluminium\n1000\nrecycled\n0.8\n120\n\n\n\n\n\n\n";
        let (result, output) = run(script);
        let input = result.unwrap();

        assert_eq!(input.name.as_deref(), Some("Smelter A"));
        assert_eq!(input.metal_type, MetalType::Aluminum);
        assert_eq!(input.production_route, ProductionRoute::Recycled);
        assert_eq!(input.quantity, 1000.0);
        assert_eq!(input.parameters.recycled_content, Some(0.8));
        assert_eq!(input.parameters.transport_distance, Some(120.0));
        assert!(input.parameters.energy_consumption.is_none());
        assert!(output.contains("Step 4 of 4: Review"));
    }

    #[test]
    fn test_reasks_invalid_metal() {
        let script = "\ngold\ncopper\n5\nprimary\n\n\n\n\n\n\n\n\n";
        let (result, output) = run(script);
        let input = result.unwrap();
        assert!(input.name.is_none());
        assert_eq!(input.metal_type, MetalType::Copper);
        assert!(output.contains("Invalid: expected one of aluminum, copper, steel, lithium"));
    }

    #[test]
    fn test_invalid_step_repeats() {
        // Quantity 0 parses but fails the step check; step 1 is asked again
        let script = "\nsteel\n0\n\nsteel\n10\nmixed\n\n\n\n\n\n\n\n\n";
        let (result, output) = run(script);
        let input = result.unwrap();
        assert_eq!(input.quantity, 10.0);
        assert!(output.contains("Basic info is incomplete: quantity"));
        assert_eq!(output.matches("Step 1 of 4").count(), 2);
    }

    #[test]
    fn test_back_from_review() {
        // Go back once from review, fill environmental data, confirm
        let script = "\nsteel\n10\nmixed\n\n\n\n\n\n\n\nb\n250\n\n\n\n\ny\n";
        let (result, _) = run(script);
        let input = result.unwrap();
        assert_eq!(input.parameters.energy_consumption, Some(250.0));
    }

    #[test]
    fn test_cancel() {
        let script = "\nsteel\n10\nmixed\n\n\n\n\n\n\n\nn\n";
        let (result, _) = run(script);
        assert!(result.unwrap_err().to_string().contains("cancelled"));
    }

    #[test]
    fn test_end_of_input() {
        let (result, _) = run("\nsteel\n");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unexpected end of input"));
    }
}
