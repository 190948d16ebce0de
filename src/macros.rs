//! Macros for declaring stackable states.

/// Declare a state struct together with its [`TypedState`] implementation.
///
/// The generated struct has a `previous` link, a `data` field and its chain
/// depth, a `new` constructor for root states and an `on` constructor that
/// stacks the state on top of a previous one. Dropping a generated state
/// releases its chain iteratively, so arbitrarily long chains drop without
/// recursion.
///
/// [`TypedState`]: crate::core::TypedState
///
/// # Example
///
/// ```
/// use stackstate::core::{InputEnvelope, NoInput, StateData, StateInput, TypedState};
/// use stackstate::stackable_state;
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// pub struct Cart {
///     items: u32,
/// }
/// impl StateData for Cart {}
///
/// #[derive(Debug)]
/// pub enum ShopInput {
///     Add,
///     Checkout,
/// }
/// impl StateInput for ShopInput {}
///
/// stackable_state! {
///     pub struct Shopping {
///         data: Cart,
///         input: ShopInput,
///     }
///     fn handle(this, input) {
///         match input {
///             ShopInput::Add => {
///                 let cart = Cart { items: this.data.items + 1 };
///                 Shopping::on(this, cart).into_ref()
///             }
///             ShopInput::Checkout => {
///                 let cart = this.data.clone();
///                 Paid::on(this, cart).into_ref()
///             }
///         }
///     }
/// }
///
/// stackable_state! {
///     pub struct Paid {
///         data: Cart,
///         input: NoInput,
///     }
///     fn handle(_this, input) {
///         match *input {}
///     }
/// }
///
/// let root = Shopping::new(Cart::default()).into_ref();
/// let next = root.dispatch(&InputEnvelope::new(ShopInput::Add)).unwrap();
/// assert_eq!(next.extract_data().narrow::<Cart>(), Some(&Cart { items: 1 }));
/// assert_eq!(next.depth(), 1);
/// ```
#[macro_export]
macro_rules! stackable_state {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            data: $data:ty,
            input: $input:ty $(,)?
        }

        fn handle($this:ident, $arg:ident) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $name {
            previous: ::core::option::Option<$crate::core::StateRef>,
            data: $data,
            depth: usize,
        }

        #[allow(dead_code)]
        impl $name {
            /// Create a root state.
            $vis fn new(data: $data) -> Self {
                Self {
                    previous: ::core::option::Option::None,
                    data,
                    depth: 0,
                }
            }

            /// Create a state stacked on `previous`.
            $vis fn on(previous: impl $crate::core::IntoStateRef, data: $data) -> Self {
                let previous = previous.into_state_ref();
                let depth = $crate::core::StateNode::depth(&*previous) + 1;
                Self {
                    previous: ::core::option::Option::Some(previous),
                    data,
                    depth,
                }
            }
        }

        impl ::core::ops::Drop for $name {
            fn drop(&mut self) {
                $crate::core::release(self.previous.take());
            }
        }

        impl $crate::core::TypedState for $name {
            type Input = $input;
            type Data = $data;

            fn previous_state(&self) -> ::core::option::Option<&$crate::core::StateRef> {
                self.previous.as_ref()
            }

            fn data(&self) -> &$data {
                &self.data
            }

            fn chain_depth(&self) -> usize {
                self.depth
            }

            fn into_previous(mut self) -> ::core::option::Option<$crate::core::StateRef> {
                self.previous.take()
            }

            #[allow(unused_variables)]
            fn handle(
                self: ::std::sync::Arc<Self>,
                input: &$input,
            ) -> $crate::core::StateRef {
                #[allow(unused_imports)]
                use $crate::core::TypedState as _;
                let $this = self;
                let $arg = input;
                $body
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{InputEnvelope, NoInput, StateData, StateInput, StateRef, TypedState};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Tally {
        hits: u32,
    }

    impl StateData for Tally {}

    #[derive(Debug)]
    enum Hit {
        Once,
        Finish,
    }

    impl StateInput for Hit {}

    stackable_state! {
        struct Counting {
            data: Tally,
            input: Hit,
        }
        fn handle(this, input) {
            match input {
                Hit::Once => {
                    let tally = Tally { hits: this.data.hits + 1 };
                    Counting::on(this, tally).into_ref()
                }
                Hit::Finish => {
                    let tally = this.data.clone();
                    Done::on(this, tally).into_ref()
                }
            }
        }
    }

    stackable_state! {
        struct Done {
            data: Tally,
            input: NoInput,
        }
        fn handle(_this, input) {
            match *input {}
        }
    }

    #[test]
    fn macro_generates_root_constructor() {
        let root = Counting::new(Tally::default());
        assert!(root.previous_state().is_none());
        assert_eq!(root.data(), &Tally { hits: 0 });
    }

    #[test]
    fn macro_generated_state_dispatches() {
        let root = Counting::new(Tally::default()).into_ref();
        let once = root.dispatch(&InputEnvelope::new(Hit::Once)).unwrap();
        let done = once.dispatch(&InputEnvelope::new(Hit::Finish)).unwrap();

        assert_eq!(done.name(), "Done");
        assert_eq!(done.extract_data().narrow::<Tally>(), Some(&Tally { hits: 1 }));
        assert_eq!(done.depth(), 2);
    }

    #[test]
    fn macro_terminal_state_falls_back() {
        let root = Counting::new(Tally::default()).into_ref();
        let done = root.dispatch(&InputEnvelope::new(Hit::Finish)).unwrap();
        let again = done.dispatch(&InputEnvelope::new(Hit::Once)).unwrap();

        assert_eq!(again.name(), "Counting");
        assert_eq!(again.extract_data().narrow::<Tally>(), Some(&Tally { hits: 1 }));
    }

    #[test]
    fn macro_records_depth_when_stacking() {
        let root = Counting::new(Tally::default()).into_ref();
        assert_eq!(root.depth(), 0);

        let once = Counting::on(root, Tally { hits: 1 });
        assert_eq!(once.chain_depth(), 1);

        let done = Done::on(once.into_ref(), Tally { hits: 1 }).into_ref();
        assert_eq!(done.depth(), 2);
        assert_eq!(done.depth(), done.chain().count() - 1);
    }

    #[test]
    fn long_chain_drops_without_overflow() {
        let mut node: StateRef = Counting::new(Tally::default()).into_ref();
        for hits in 1..=200_000 {
            node = Counting::on(node, Tally { hits }).into_ref();
        }

        assert_eq!(node.depth(), 200_000);
        drop(node);
    }

    #[test]
    fn dropping_a_branch_keeps_shared_ancestors() {
        let base = Counting::new(Tally::default()).into_ref();
        let mut branch: StateRef = Counting::on(base.clone(), Tally { hits: 1 }).into_ref();
        for hits in 2..=1_000 {
            branch = Counting::on(branch, Tally { hits }).into_ref();
        }

        drop(branch);

        assert_eq!(std::sync::Arc::strong_count(&base), 1);
        assert_eq!(base.extract_data().narrow::<Tally>(), Some(&Tally { hits: 0 }));
    }
}
