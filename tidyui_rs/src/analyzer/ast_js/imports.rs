//! Import declaration handling.
//!
//! Named specifiers contribute their *imported* name (`Card` in
//! `import { Card as Tile }`), default specifiers their local name.
//! Namespace imports and side-effect imports contribute nothing.

use oxc_ast::ast::*;

use super::visitor::OutlineVisitor;

impl OutlineVisitor<'_> {
    pub(super) fn handle_import_declaration(&mut self, decl: &ImportDeclaration<'_>) {
        let Some(specifiers) = &decl.specifiers else {
            return;
        };
        for spec in specifiers {
            match spec {
                ImportDeclarationSpecifier::ImportSpecifier(s) => {
                    let name = Self::module_export_name(&s.imported);
                    self.outline.import_names.push(name);
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    self.outline.import_names.push(s.local.name.to_string());
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => {}
            }
        }
    }
}
