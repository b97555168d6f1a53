use std::{
    borrow::Cow,
    fmt::{Debug, Display},
    ops::Deref,
    panic::RefUnwindSafe,
};

#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Group {
    pub name: Cow<'static, str>,
    pub children: Vec<SuiteNode>,
    pub before_all: Option<CaseFnHandle>,
    pub after_all: Option<CaseFnHandle>,
}

impl Group {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            before_all: None,
            after_all: None,
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.children.push(SuiteNode::Group(group));
        self
    }

    pub fn with_case(mut self, case: Case) -> Self {
        self.children.push(SuiteNode::Case(case));
        self
    }

    pub fn with_before_all(mut self, hook: CaseFnHandle) -> Self {
        self.before_all = Some(hook);
        self
    }

    pub fn with_after_all(mut self, hook: CaseFnHandle) -> Self {
        self.after_all = Some(hook);
        self
    }

    /// Number of cases in this group and all groups below it.
    pub fn case_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                SuiteNode::Group(group) => group.case_count(),
                SuiteNode::Case(_) => 1,
            })
            .sum()
    }
}

#[derive(Debug)]
pub enum SuiteNode {
    Group(Group),
    Case(Case),
}

impl From<Group> for SuiteNode {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<Case> for SuiteNode {
    fn from(case: Case) -> Self {
        Self::Case(case)
    }
}

#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Case {
    function: CaseFnHandle,
    pub meta: CaseMeta,
}

impl Case {
    pub const fn new(function: CaseFnHandle, meta: CaseMeta) -> Self {
        Self { function, meta }
    }

    pub(crate) fn call(&self) -> CaseResult {
        self.function.call()
    }
}

impl Deref for Case {
    type Target = CaseMeta;

    fn deref(&self) -> &Self::Target {
        &self.meta
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaseMeta {
    pub name: Cow<'static, str>,
    /// Statically mark the case as skipped; the body never runs.
    pub skip: bool,
    /// Extra attempts after a failed first one. Zero means a single attempt.
    pub retries: u32,
}

#[non_exhaustive]
pub enum CaseFnHandle {
    Ptr(fn() -> CaseResult),
    Owned(Box<dyn CaseFn + RefUnwindSafe>),
    Static(&'static (dyn CaseFn + RefUnwindSafe)),
}

impl Debug for CaseFnHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ptr(ptr) => f.debug_tuple("Ptr").field(ptr).finish(),
            Self::Owned(_) => write!(f, "Owned(...)"),
            Self::Static(_) => write!(f, "Static(...)"),
        }
    }
}

impl Default for CaseFnHandle {
    fn default() -> Self {
        Self::Static(&|| {})
    }
}

impl CaseFnHandle {
    pub const fn from_const_fn(f: fn() -> CaseResult) -> Self {
        Self::Ptr(f)
    }

    pub fn from_boxed<F, T>(f: F) -> Self
    where
        F: Fn() -> T + RefUnwindSafe + 'static,
        T: Into<CaseResult>,
    {
        Self::Owned(Box::new(f))
    }

    pub const fn from_static_obj(f: &'static (dyn CaseFn + RefUnwindSafe)) -> Self {
        Self::Static(f)
    }

    pub fn call(&self) -> CaseResult {
        match self {
            Self::Ptr(f) => f(),
            Self::Owned(f) => f.call_case(),
            Self::Static(f) => f.call_case(),
        }
    }
}

pub trait CaseFn {
    fn call_case(&self) -> CaseResult;
}

impl<F, T> CaseFn for F
where
    F: Fn() -> T,
    T: Into<CaseResult>,
{
    fn call_case(&self) -> CaseResult {
        (self)().into()
    }
}

#[derive(Debug)]
pub struct CaseResult(pub Result<(), String>);

impl From<()> for CaseResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

// Display, not Debug: a string error must arrive as its own message, not a
// quoted rendering of it.
impl<E: Display> From<Result<(), E>> for CaseResult {
    fn from(v: Result<(), E>) -> Self {
        CaseResult(v.map_err(|e| e.to_string()))
    }
}
