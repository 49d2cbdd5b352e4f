/// Response type for the `Module::call` method.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct CallResponse {}
