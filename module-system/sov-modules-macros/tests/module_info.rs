use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::{Context, ModuleInfo, Prefix, StateMap, StateValue};

mod first_test_module {
    use super::*;

    #[derive(ModuleInfo)]
    pub(crate) struct FirstTestStruct<C>
    where
        C: Context,
    {
        #[address]
        pub address: C::Address,

        /// Documented members keep working.
        #[state]
        pub state_in_first_struct_1: StateMap<C::Address, u32>,

        #[state]
        pub state_in_first_struct_2: StateValue<String>,
    }
}

mod second_test_module {
    use super::*;

    #[derive(ModuleInfo)]
    pub(crate) struct SecondTestStruct<C: Context> {
        #[address]
        pub address: C::Address,

        #[state]
        pub state_in_second_struct_1: StateMap<String, u32>,

        #[module]
        pub module_in_second_struct_1: first_test_module::FirstTestStruct<C>,
    }
}

type C = DefaultContext;

#[test]
fn test_state_prefixes() {
    let second_test_struct = second_test_module::SecondTestStruct::<C>::default();

    let prefix2 = second_test_struct.state_in_second_struct_1.prefix();
    assert_eq!(
        *prefix2,
        Prefix::new_storage(
            "module_info::second_test_module",
            "SecondTestStruct",
            "state_in_second_struct_1",
        )
        .into()
    );

    let prefix1 = second_test_struct
        .module_in_second_struct_1
        .state_in_first_struct_1
        .prefix();
    assert_eq!(
        *prefix1,
        Prefix::new_storage(
            "module_info::first_test_module",
            "FirstTestStruct",
            "state_in_first_struct_1"
        )
        .into()
    );
}

#[test]
fn test_addresses_and_dependencies() {
    let second_test_struct = second_test_module::SecondTestStruct::<C>::default();
    let first_test_struct = first_test_module::FirstTestStruct::<C>::default();

    let expected_address: <C as sov_modules_api::Spec>::Address =
        Prefix::new_module("module_info::second_test_module", "SecondTestStruct")
            .hash::<C>()
            .into();
    assert_eq!(second_test_struct.address(), &expected_address);

    assert_eq!(
        second_test_struct.dependencies(),
        [first_test_struct.address()]
    );
    assert!(first_test_struct.dependencies().is_empty());
    assert_ne!(first_test_struct.address(), second_test_struct.address());
}
