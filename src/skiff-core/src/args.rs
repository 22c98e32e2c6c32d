//! Positional argument specs and binding.

use crate::command::CommandError;

/// Value bound to a positional argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ArgValue {
    /// Nothing bound yet (or the optional argument was not supplied).
    #[default]
    None,
    /// A single input token.
    Single(String),
    /// All remaining input tokens, for an array argument.
    Array(Vec<String>),
}

impl ArgValue {
    pub fn is_none(&self) -> bool {
        matches!(self, ArgValue::None)
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            ArgValue::Single(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            ArgValue::Array(v) => Some(v),
            _ => None,
        }
    }
}

/// A declared positional argument.
#[derive(Debug, Clone)]
pub struct Argument {
    /// Argument name, shown in the help Arguments section.
    pub name: String,

    /// Name used in binding error messages; defaults to `name`.
    pub display_name: String,

    /// Description shown in the help Arguments section.
    pub description: String,

    /// Whether input must supply a value for this argument.
    pub required: bool,

    /// Whether this argument consumes all remaining input tokens.
    pub is_array: bool,

    /// 1-based position, assigned at registration.
    pub(crate) index: usize,

    pub(crate) value: ArgValue,
}

impl Argument {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            description: description.into(),
            required: false,
            is_array: false,
            index: 0,
            value: ArgValue::None,
        }
    }

    /// Mark the argument as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the argument as an array consuming all remaining tokens.
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Override the name used in binding error messages.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// 1-based position among the command's declared arguments.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value bound by the last execution.
    pub fn value(&self) -> &ArgValue {
        &self.value
    }
}

/// Bind input tokens to the declared arguments, in declaration order.
///
/// Binding stops at the first optional argument with no token left; a
/// required argument with no token left is an error. An array argument
/// takes every remaining token. With `strict` set, leftover tokens after
/// the last declared argument are an error. Values bound before a failure
/// stay bound.
pub(crate) fn bind_named_args(
    args: &mut [Argument],
    input: &[String],
    strict: bool,
) -> Result<(), CommandError> {
    let mut num = 0;
    let mut in_num = input.len();

    for (i, arg) in args.iter_mut().enumerate() {
        num = i + 1;
        if num > in_num {
            if arg.required {
                return Err(CommandError::MissingArgument {
                    name: arg.display_name.clone(),
                    position: arg.index,
                });
            }
            break;
        }

        if arg.is_array {
            arg.value = ArgValue::Array(input[i..].to_vec());
            in_num = num;
        } else {
            arg.value = ArgValue::Single(input[i].clone());
        }
    }

    if strict && in_num > num {
        return Err(CommandError::TooManyArguments {
            extra: input[num..].to_vec(),
        });
    }
    Ok(())
}
