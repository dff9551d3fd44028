//! Generate command.

use crate::cli::Context;
use crate::core::password::PasswordGenerator;
use crate::error::Result;

/// Print `count` passwords, one per line.
pub fn execute(ctx: &Context, length: Option<usize>, count: usize) -> Result<()> {
    let spec = ctx.config.generation_spec(length)?;
    let mut generator = PasswordGenerator::from_os();

    for _ in 0..count {
        let password = generator.generate(&spec)?;
        // Plain output for scripting - no decoration
        println!("{}", password.as_str());
    }

    Ok(())
}
