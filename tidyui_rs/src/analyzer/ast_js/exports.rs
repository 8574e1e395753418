//! Export declaration handling.
//!
//! Collects exported component symbols:
//! - Named exports: `export function Card() {}`, `export const Card = () => …`
//! - Specifier exports: `export { Card }`, `export { Card as default }`
//! - Default exports: `export default function Card() {}`, `export default Card`,
//!   and anonymous defaults named after the file.
//!
//! Re-exports (`export { Card } from './Card'`) are skipped: the symbol is
//! owned by the module it comes from.

use oxc_ast::ast::*;

use crate::types::ExportKind;

use super::visitor::OutlineVisitor;

impl OutlineVisitor<'_> {
    pub(super) fn handle_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'_>) {
        if decl.source.is_some() {
            return;
        }

        if let Some(declaration) = &decl.declaration {
            match declaration {
                Declaration::FunctionDeclaration(f) => {
                    if let Some(id) = &f.id {
                        self.push_export(&id.name, ExportKind::Named, decl.span);
                    }
                }
                Declaration::VariableDeclaration(var) => {
                    for d in &var.declarations {
                        if let BindingPattern::BindingIdentifier(id) = &d.id {
                            let is_component = d
                                .init
                                .as_ref()
                                .is_some_and(Self::is_component_initializer);
                            if is_component {
                                self.push_export(&id.name, ExportKind::Named, decl.span);
                            }
                        }
                    }
                }
                Declaration::ClassDeclaration(c) => {
                    if let Some(id) = &c.id {
                        self.push_export(&id.name, ExportKind::Named, decl.span);
                    }
                }
                _ => {}
            }
        }

        // export { Card }; export { Card as default };
        for spec in &decl.specifiers {
            let exported = Self::module_export_name(&spec.exported);
            if exported == "default" {
                let local = Self::module_export_name(&spec.local);
                self.push_export(&local, ExportKind::Default, decl.span);
            } else {
                self.push_export(&exported, ExportKind::Named, decl.span);
            }
        }
    }

    pub(super) fn handle_export_default_declaration(
        &mut self,
        decl: &ExportDefaultDeclaration<'_>,
    ) {
        match &decl.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(f) => match &f.id {
                Some(id) => self.push_export(&id.name, ExportKind::Default, decl.span),
                None => self.push_anonymous_default(decl.span),
            },
            ExportDefaultDeclarationKind::ClassDeclaration(c) => match &c.id {
                Some(id) => self.push_export(&id.name, ExportKind::Default, decl.span),
                None => self.push_anonymous_default(decl.span),
            },
            ExportDefaultDeclarationKind::Identifier(id) => {
                self.push_export(&id.name, ExportKind::Default, decl.span);
            }
            // Type-only defaults are not components.
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(_) => {}
            _ => self.push_anonymous_default(decl.span),
        }
    }
}
