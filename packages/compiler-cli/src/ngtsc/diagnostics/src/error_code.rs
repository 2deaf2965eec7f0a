#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DecoratorArgNotLiteral = 1001,
    DecoratorArityWrong = 1002,

    ComponentMissingTemplate = 2001,
    ParamMissingToken = 2003,

    /// Raised when a component cannot resolve an external resource, such as
    /// a template or a style sheet.
    ComponentResourceNotFound = 2008,

    /// Raised when a relationship between directives and/or pipes would
    /// cause a cyclic import to be created which cannot be handled.
    ImportCycleDetected = 3003,

    ConfigFlatModuleNoIndexFile = 4001,

    /// The template could not be parsed.
    TemplateParseError = 5002,

    /// An element name failed validation against the DOM schema.
    SchemaInvalidElement = 8001,

    /// The pipe used in an expression is not defined.
    MissingPipe = 8004,

    /// A two way binding in a template has an incorrect syntax,
    /// e.g. `<div ([foo])="bar" />`.
    InvalidBananaInBox = 8101,

    /// A text attribute is used where a binding was almost certainly
    /// intended, e.g. `attr.x="value"` instead of `[attr.x]="value"`.
    TextAttributeNotBinding = 8104,

    /// A type check block (TCB) requires inlining but the current
    /// environment does not support it.
    InlineTcbRequired = 8900,

    /// A type constructor requires inlining but the current environment
    /// does not support it.
    InlineTypeCtorRequired = 8901,

    /// An Angular symbol is visible to consumers of an entry point but is
    /// not exported from it.
    SymbolNotExported = 6002,
}
