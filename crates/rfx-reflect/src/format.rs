//! Display helpers for diagnostics.

use crate::provider::TypeMetadataProvider;
use crate::types::TypeId;

/// Renders a parameter list as `(int, String[])`.
pub fn format_signature<P: TypeMetadataProvider + ?Sized>(provider: &P, params: &[TypeId]) -> String {
    let mut out = String::from("(");
    for (i, &param) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&provider.type_name(param));
    }
    out.push(')');
    out
}
