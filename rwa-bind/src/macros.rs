// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Declarative generators for typed contract bindings.
//!
//! A binding is declared in four steps:
//!
//! 1. [`contract_binding!`] declares the handle `Name` together with its `NameCaller`,
//!    `NameTransactor` and `NameFilterer` halves and the three session types.
//! 2. [`caller_methods!`] adds one typed method per constant function.
//! 3. [`transactor_methods!`] adds one typed method per state-changing function.
//! 4. [`abi_event!`] declares event records and [`event_filters!`] adds their
//!    `filter_*`, `watch_*` and `parse_*` methods.

/// Declares a contract handle and its caller, transactor, filterer and session types.
///
/// ```ignore
/// contract_binding! {
///     /// The RWA asset manager.
///     pub struct RwaManager(include_str!("../abi/AssetManagerRWA.json"));
/// }
/// ```
#[macro_export]
macro_rules! contract_binding {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($abi:expr);
    ) => {
        $crate::private::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone)]
            $vis struct $name {
                pub caller: [<$name Caller>],
                pub transactor: [<$name Transactor>],
                pub filterer: [<$name Filterer>],
            }

            /// Read-only half of a contract handle.
            #[derive(Debug, Clone)]
            $vis struct [<$name Caller>] {
                contract: ::std::sync::Arc<$crate::BoundContract>,
            }

            /// Write-only half of a contract handle.
            #[derive(Debug, Clone)]
            $vis struct [<$name Transactor>] {
                contract: ::std::sync::Arc<$crate::BoundContract>,
            }

            /// Log filtering half of a contract handle.
            #[derive(Debug, Clone)]
            $vis struct [<$name Filterer>] {
                contract: ::std::sync::Arc<$crate::BoundContract>,
            }

            /// A contract handle with preset call and transact options.
            #[derive(Debug, Clone)]
            $vis struct [<$name Session>]<'a> {
                pub contract: &'a $name,
                pub call_opts: $crate::CallOpts,
                pub transact_opts: $crate::TransactOpts,
            }

            #[derive(Debug, Clone)]
            $vis struct [<$name CallerSession>]<'a> {
                pub contract: &'a [<$name Caller>],
                pub call_opts: $crate::CallOpts,
            }

            #[derive(Debug, Clone)]
            $vis struct [<$name TransactorSession>]<'a> {
                pub contract: &'a [<$name Transactor>],
                pub transact_opts: $crate::TransactOpts,
            }

            impl $name {
                /// The JSON ABI this binding was generated from.
                pub const ABI_JSON: &'static str = $abi;

                /// The parsed ABI, shared by every handle of this contract.
                pub fn abi() -> $crate::Result<::std::sync::Arc<$crate::private::Abi>> {
                    $crate::private::lazy_static! {
                        static ref ABI: ::std::result::Result<
                            ::std::sync::Arc<$crate::private::Abi>,
                            $crate::private::AbiError,
                        > = $crate::private::Abi::parse($name::ABI_JSON).map(::std::sync::Arc::new);
                    }
                    ABI.clone().map_err(::std::convert::Into::into)
                }

                /// Binds to a deployed contract using one backend for every capability.
                pub fn new<B: $crate::ContractBackend + 'static>(
                    address: $crate::private::Address,
                    backend: ::std::sync::Arc<B>,
                ) -> $crate::Result<Self> {
                    let contract = $crate::BoundContract::with_backend(address, Self::abi()?, backend);
                    Ok(Self::from_bound(::std::sync::Arc::new(contract)))
                }

                /// Binds with individually supplied capabilities. Operations needing a missing
                /// one fail with `Error::Unsupported`.
                pub fn bind(
                    address: $crate::private::Address,
                    caller: ::std::option::Option<::std::sync::Arc<dyn $crate::ContractCaller>>,
                    transactor: ::std::option::Option<::std::sync::Arc<dyn $crate::ContractTransactor>>,
                    filterer: ::std::option::Option<::std::sync::Arc<dyn $crate::ContractFilterer>>,
                ) -> $crate::Result<Self> {
                    let contract = $crate::BoundContract::new(address, Self::abi()?, caller, transactor, filterer);
                    Ok(Self::from_bound(::std::sync::Arc::new(contract)))
                }

                fn from_bound(contract: ::std::sync::Arc<$crate::BoundContract>) -> Self {
                    Self {
                        caller: [<$name Caller>] { contract: contract.clone() },
                        transactor: [<$name Transactor>] { contract: contract.clone() },
                        filterer: [<$name Filterer>] { contract },
                    }
                }

                pub fn address(&self) -> $crate::private::Address {
                    self.caller.contract.address()
                }

                /// The untyped handle, for methods not covered by the typed surface.
                pub fn raw(&self) -> &$crate::BoundContract {
                    &self.caller.contract
                }

                pub fn session(
                    &self,
                    call_opts: $crate::CallOpts,
                    transact_opts: $crate::TransactOpts,
                ) -> [<$name Session>]<'_> {
                    [<$name Session>] {
                        contract: self,
                        call_opts,
                        transact_opts,
                    }
                }
            }

            impl [<$name Caller>] {
                /// Binds a read-only handle.
                pub fn new<B: $crate::ContractCaller + 'static>(
                    address: $crate::private::Address,
                    caller: ::std::sync::Arc<B>,
                ) -> $crate::Result<Self> {
                    let caller: ::std::sync::Arc<dyn $crate::ContractCaller> = caller;
                    let contract = $crate::BoundContract::new(address, $name::abi()?, Some(caller), None, None);
                    Ok(Self { contract: ::std::sync::Arc::new(contract) })
                }

                pub fn raw(&self) -> &$crate::BoundContract {
                    &self.contract
                }

                pub fn session(&self, call_opts: $crate::CallOpts) -> [<$name CallerSession>]<'_> {
                    [<$name CallerSession>] { contract: self, call_opts }
                }
            }

            impl [<$name Transactor>] {
                /// Binds a write-only handle.
                pub fn new<B: $crate::ContractTransactor + 'static>(
                    address: $crate::private::Address,
                    transactor: ::std::sync::Arc<B>,
                ) -> $crate::Result<Self> {
                    let transactor: ::std::sync::Arc<dyn $crate::ContractTransactor> = transactor;
                    let contract = $crate::BoundContract::new(address, $name::abi()?, None, Some(transactor), None);
                    Ok(Self { contract: ::std::sync::Arc::new(contract) })
                }

                pub fn raw(&self) -> &$crate::BoundContract {
                    &self.contract
                }

                pub fn session(&self, transact_opts: $crate::TransactOpts) -> [<$name TransactorSession>]<'_> {
                    [<$name TransactorSession>] { contract: self, transact_opts }
                }

                /// Sends plain value to the contract.
                pub async fn transfer(&self, opts: &$crate::TransactOpts) -> $crate::Result<$crate::SignedTransaction> {
                    self.contract.transfer(opts).await
                }
            }

            impl [<$name Filterer>] {
                /// Binds a log filtering handle.
                pub fn new<B: $crate::ContractFilterer + 'static>(
                    address: $crate::private::Address,
                    filterer: ::std::sync::Arc<B>,
                ) -> $crate::Result<Self> {
                    let filterer: ::std::sync::Arc<dyn $crate::ContractFilterer> = filterer;
                    let contract = $crate::BoundContract::new(address, $name::abi()?, None, None, Some(filterer));
                    Ok(Self { contract: ::std::sync::Arc::new(contract) })
                }

                pub fn raw(&self) -> &$crate::BoundContract {
                    &self.contract
                }
            }
        }
    };
}

/// Adds typed constant methods to a binding declared with [`contract_binding!`].
///
/// Each entry maps a Rust method name onto the ABI function name it invokes. Functions
/// returning several values return a record declared with `abi_struct!`, filled in order.
#[macro_export]
macro_rules! caller_methods {
    (
        $name:ident;
        $(
            $(#[$meta:meta])*
            fn $method:ident = $abi_name:literal ($($arg:ident : $ty:ty),* $(,)?) -> $ret:ty;
        )*
    ) => {
        $crate::private::paste! {
            impl [<$name Caller>] {
                $(
                    $(#[$meta])*
                    pub async fn $method(&self, opts: &$crate::CallOpts $(, $arg: $ty)*) -> $crate::Result<$ret> {
                        let args: ::std::vec::Vec<$crate::private::Value> =
                            vec![$($crate::private::AbiValue::to_value(&$arg)),*];
                        let outputs = self.contract.call(opts, $abi_name, &args).await?;
                        Ok($crate::private::from_outputs(outputs)?)
                    }
                )*
            }

            impl<'a> [<$name Session>]<'a> {
                $(
                    $(#[$meta])*
                    pub async fn $method(&self $(, $arg: $ty)*) -> $crate::Result<$ret> {
                        self.contract.caller.$method(&self.call_opts $(, $arg)*).await
                    }
                )*
            }

            impl<'a> [<$name CallerSession>]<'a> {
                $(
                    $(#[$meta])*
                    pub async fn $method(&self $(, $arg: $ty)*) -> $crate::Result<$ret> {
                        self.contract.$method(&self.call_opts $(, $arg)*).await
                    }
                )*
            }
        }
    };
}

/// Adds typed state-changing methods to a binding declared with [`contract_binding!`].
///
/// Every method returns the signed transaction once the node accepted it.
#[macro_export]
macro_rules! transactor_methods {
    (
        $name:ident;
        $(
            $(#[$meta:meta])*
            fn $method:ident = $abi_name:literal ($($arg:ident : $ty:ty),* $(,)?);
        )*
    ) => {
        $crate::private::paste! {
            impl [<$name Transactor>] {
                $(
                    $(#[$meta])*
                    pub async fn $method(
                        &self,
                        opts: &$crate::TransactOpts
                        $(, $arg: $ty)*
                    ) -> $crate::Result<$crate::SignedTransaction> {
                        let args: ::std::vec::Vec<$crate::private::Value> =
                            vec![$($crate::private::AbiValue::to_value(&$arg)),*];
                        self.contract.transact(opts, $abi_name, &args).await
                    }
                )*
            }

            impl<'a> [<$name Session>]<'a> {
                $(
                    $(#[$meta])*
                    pub async fn $method(&self $(, $arg: $ty)*) -> $crate::Result<$crate::SignedTransaction> {
                        self.contract.transactor.$method(&self.transact_opts $(, $arg)*).await
                    }
                )*
            }

            impl<'a> [<$name TransactorSession>]<'a> {
                $(
                    $(#[$meta])*
                    pub async fn $method(&self $(, $arg: $ty)*) -> $crate::Result<$crate::SignedTransaction> {
                        self.contract.$method(&self.transact_opts $(, $arg)*).await
                    }
                )*
            }
        }
    };
}

/// Declares a typed event record.
///
/// Fields are listed in ABI declaration order, indexed or not. The log the record was
/// decoded from is kept in `raw`.
#[macro_export]
macro_rules! abi_event {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = $event:literal {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
            pub raw: $crate::RawLog,
        }

        impl $crate::ContractEvent for $name {
            const NAME: &'static str = $event;

            fn from_values(
                values: ::std::vec::Vec<$crate::private::Value>,
                raw: $crate::RawLog,
            ) -> $crate::private::AbiResult<Self> {
                const FIELDS: usize = [$(stringify!($field)),*].len();
                let mut fields =
                    $crate::private::typed::into_fields($crate::private::Value::Tuple(values), FIELDS)?;
                Ok(Self {
                    $($field: $crate::private::typed::next_field(&mut fields, stringify!($field))?,)*
                    raw,
                })
            }

            fn raw(&self) -> &$crate::RawLog {
                &self.raw
            }
        }
    };
}

/// Adds `filter_*`, `watch_*` and `parse_*` methods for events declared with [`abi_event!`].
///
/// Each entry lists the event's indexed fields. Filter methods take one slice per indexed
/// field; an empty slice matches any value.
#[macro_export]
macro_rules! event_filters {
    (
        $name:ident;
        $(
            $event:ident => $snake:ident ($($field:ident : $ty:ty),* $(,)?);
        )*
    ) => {
        $crate::private::paste! {
            impl [<$name Filterer>] {
                $(
                    /// Past events, narrowed by indexed fields.
                    pub async fn [<filter_ $snake>](
                        &self,
                        opts: &$crate::FilterOpts
                        $(, $field: &[$ty])*
                    ) -> $crate::Result<$crate::EventIterator<$event>> {
                        let indexed: ::std::vec::Vec<::std::vec::Vec<$crate::private::Value>> = vec![
                            $($field.iter().map(<$ty as $crate::private::AbiValue>::to_value).collect()),*
                        ];
                        self.contract.filter_events::<$event>(opts, &indexed).await
                    }

                    /// Forwards new events into `sink` until unsubscribed.
                    pub async fn [<watch_ $snake>](
                        &self,
                        opts: &$crate::WatchOpts,
                        sink: $crate::private::mpsc::Sender<$event>
                        $(, $field: &[$ty])*
                    ) -> $crate::Result<$crate::EventSubscription> {
                        let indexed: ::std::vec::Vec<::std::vec::Vec<$crate::private::Value>> = vec![
                            $($field.iter().map(<$ty as $crate::private::AbiValue>::to_value).collect()),*
                        ];
                        self.contract.watch_events(opts, sink, &indexed).await
                    }

                    pub fn [<parse_ $snake>](&self, log: $crate::RawLog) -> $crate::Result<$event> {
                        self.contract.parse_log(log)
                    }
                )*
            }
        }
    };
}
