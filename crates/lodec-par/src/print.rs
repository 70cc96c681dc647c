//! Debug rendering of the AST.
//!
//! Depth-first, four spaces of indent per level. Each line is
//! `label: text` where the label is `S` for the root and `L`/`M`/`R`
//! for a child's slot; sequences (blocks, argument lists, enum members)
//! print their elements in order under their parent's slot label.

use crate::ast::*;

const INDENT: &str = "    ";

/// Renders the program to a string.
pub fn render_ast(program: &Program<'_>) -> String {
    let mut out = String::new();
    line(&mut out, 0, 'S', "program");
    for stmt in &program.stmts {
        write_stmt(&mut out, stmt, 1, 'L');
    }
    out
}

/// Prints the program to stdout.
pub fn print_ast(program: &Program<'_>) {
    print!("{}", render_ast(program));
}

fn line(out: &mut String, depth: usize, label: char, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push(label);
    out.push_str(": ");
    out.push_str(text);
    out.push('\n');
}

fn write_block(out: &mut String, block: &Block<'_>, depth: usize, label: char) {
    for stmt in block {
        write_stmt(out, stmt, depth, label);
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt<'_>, depth: usize, label: char) {
    match stmt {
        Stmt::Expr(expr) => write_expr(out, expr, depth, label),
        Stmt::If(node) => write_if(out, node, depth, label),
        Stmt::While(node) => {
            line(out, depth, label, "while");
            write_expr(out, &node.condition, depth + 1, 'L');
            write_block(out, &node.body, depth + 1, 'R');
        },
        Stmt::For(node) => {
            line(out, depth, label, "for");
            write_stmt(out, &node.init, depth + 1, 'L');
            line(out, depth + 1, 'R', "while");
            write_expr(out, &node.desugared.condition, depth + 2, 'L');
            write_block(out, &node.desugared.body, depth + 2, 'R');
        },
        Stmt::Break(_) => line(out, depth, label, "break"),
        Stmt::Continue(_) => line(out, depth, label, "continue"),
        Stmt::Return(node) => {
            line(out, depth, label, "return");
            if let Some(value) = &node.value {
                write_expr(out, value, depth + 1, 'L');
            }
        },
    }
}

fn write_if(out: &mut String, node: &IfStmt<'_>, depth: usize, label: char) {
    line(out, depth, label, "if");
    write_expr(out, &node.condition, depth + 1, 'L');
    write_block(out, &node.then_body, depth + 1, 'M');
    match &node.else_arm {
        Some(ElseArm::ElseIf(nested)) => write_if(out, nested, depth + 1, 'R'),
        Some(ElseArm::Else(block)) => write_block(out, block, depth + 1, 'R'),
        None => {},
    }
}

fn write_expr(out: &mut String, expr: &Expr<'_>, depth: usize, label: char) {
    match expr {
        Expr::Literal(node) | Expr::EnumIdentifier(node) => {
            line(out, depth, label, node.token.lexeme);
        },
        Expr::Identifier(node) | Expr::Declaration(node) => {
            line(out, depth, label, node.token.lexeme);
            if let Some(index) = &node.index {
                write_expr(out, index, depth + 1, 'M');
            }
        },
        Expr::Assignment(node) => {
            line(out, depth, label, node.target.lexeme);
            write_expr(out, &node.value, depth + 1, 'L');
            if let Some(index) = &node.index {
                write_expr(out, index, depth + 1, 'M');
            }
        },
        Expr::TerseAssignment(node) => {
            line(out, depth, label, node.op.lexeme);
            write_expr(out, &node.target, depth + 1, 'L');
            write_expr(out, &node.value, depth + 1, 'R');
        },
        Expr::Unary(node) => {
            line(out, depth, label, node.op.lexeme);
            write_expr(out, &node.operand, depth + 1, 'L');
        },
        Expr::Binary(node) => {
            line(out, depth, label, node.op.lexeme);
            write_expr(out, &node.lhs, depth + 1, 'L');
            write_expr(out, &node.rhs, depth + 1, 'R');
        },
        Expr::Ternary(node) => {
            line(out, depth, label, "?:");
            write_expr(out, &node.condition, depth + 1, 'L');
            write_expr(out, &node.if_true, depth + 1, 'M');
            write_expr(out, &node.if_false, depth + 1, 'R');
        },
        Expr::PrefixIncrement(node) | Expr::PrefixDecrement(node) => {
            line(out, depth, label, node.op.lexeme);
            write_expr(out, &node.operand, depth + 1, 'L');
        },
        Expr::PostfixIncrement(node) => {
            line(out, depth, label, &format!("{}++", node.token.lexeme));
        },
        Expr::PostfixDecrement(node) => {
            line(out, depth, label, &format!("{}--", node.token.lexeme));
        },
        Expr::Subscript(node) => {
            line(out, depth, label, "[]");
            write_expr(out, &node.target, depth + 1, 'L');
            write_expr(out, &node.index, depth + 1, 'M');
        },
        Expr::Call(node) => {
            line(out, depth, label, node.name.lexeme);
            for arg in &node.args {
                write_expr(out, arg, depth + 1, 'M');
            }
        },
        Expr::Function(node) => {
            line(out, depth, label, node.name.lexeme);
            line(out, depth + 1, 'L', node.return_type.token.lexeme);
            for param in &node.params {
                line(out, depth + 1, 'M', param.token.lexeme);
            }
            if let Some(body) = &node.body {
                write_block(out, body, depth + 1, 'R');
            }
        },
        Expr::EnumDecl(node) => {
            line(out, depth, label, node.name.lexeme);
            for member in &node.members {
                write_expr(out, member, depth + 1, 'L');
            }
        },
        Expr::StructDecl(node) => {
            line(out, depth, label, node.name.lexeme);
            write_block(out, &node.body, depth + 1, 'L');
        },
    }
}
