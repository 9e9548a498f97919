pub mod error;

pub use error::{
    FieldError, PanelError, PanelResult, Result, StoreError, ValidationErrors,
};
