pub use self::expression::Expression;
pub use self::variable_map::VariableMap;

mod expression;
mod variable_map;
