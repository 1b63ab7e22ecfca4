macro_rules! nutype_string {
    ($(#[doc = $doc:literal])* $ident:ident($($args:tt)*)) => {
        #[::nutype::nutype(
            $($args)*
            derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
        )]
        $(#[doc = $doc])*
        pub struct $ident(String);
    };
}

pub(crate) use nutype_string;
