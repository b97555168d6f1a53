use std::{borrow::Cow, panic::RefUnwindSafe};

use crate::suite::{Case, CaseFn, CaseFnHandle, CaseMeta};

pub struct BuildCase {
    pub func: CaseFnHandle,
    pub name: Cow<'static, str>,
    pub skip: bool,
    pub retries: u32,
}

impl Default for BuildCase {
    fn default() -> Self {
        Self {
            func: CaseFnHandle::Static(&|| {}),
            name: Default::default(),
            skip: false,
            retries: 0,
        }
    }
}

impl From<BuildCase> for Case {
    fn from(value: BuildCase) -> Self {
        Case::new(
            value.func,
            CaseMeta {
                name: value.name,
                skip: value.skip,
                retries: value.retries,
            },
        )
    }
}

impl<F> From<F> for CaseFnHandle
where
    F: CaseFn + RefUnwindSafe + 'static,
{
    fn from(value: F) -> Self {
        CaseFnHandle::Owned(Box::new(value))
    }
}

macro_rules! case {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::suite::Case::from($crate::test_support::BuildCase {
            $($field: From::from($value),)*
            ..($crate::test_support::BuildCase {
                name: concat!(module_path!(), "::", file!(), ":", line!(), ":", column!()).into(),
                ..Default::default()
            })
        })
    };
}

pub(crate) use case;
