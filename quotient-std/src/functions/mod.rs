//! Builtin functions, one module per category
//!
//! Every module exposes a `FUNCTIONS` table; operators of the grammar lower
//! to calls of the arithmetic, bitwise and logic entries.

/// A `Builtin` table entry: names (canonical first), arity, category,
/// description, usage, examples and the implementing fn.
macro_rules! builtin {
    (
        $name:literal $(| $alias:literal)*,
        $arity:expr,
        $category:expr,
        $description:literal,
        $usage:literal,
        [$($example:literal),* $(,)?],
        $eval:path $(,)?
    ) => {
        ::quotient_plugin::Builtin::new(
            ::quotient_plugin::FunctionMeta {
                name: $name,
                aliases: &[$($alias),*],
                description: $description,
                usage: $usage,
                arity: $arity,
                category: $category,
                examples: &[$($example),*],
            },
            $eval,
        )
    };
}

mod aggregate;
mod arithmetic;
mod bitwise;
mod combinatorics;
mod constants;
mod logic;
mod powers;
mod trig;

use quotient_plugin::Builtin;

pub use aggregate::FUNCTIONS as AGGREGATE;
pub use arithmetic::FUNCTIONS as ARITHMETIC;
pub use bitwise::FUNCTIONS as BITWISE;
pub use combinatorics::FUNCTIONS as COMBINATORICS;
pub use constants::FUNCTIONS as CONSTANTS;
pub use logic::FUNCTIONS as LOGIC;
pub use powers::FUNCTIONS as POWERS;
pub use trig::FUNCTIONS as TRIGONOMETRY;

/// Every builtin, category by category.
pub fn all() -> impl Iterator<Item = Builtin> {
    [ARITHMETIC, COMBINATORICS, POWERS, BITWISE, AGGREGATE, TRIGONOMETRY, CONSTANTS, LOGIC]
        .into_iter()
        .flatten()
        .copied()
}
