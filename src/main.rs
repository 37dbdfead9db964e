use anyhow::Result;

use lamb::ast::Expr;
use lamb::interpreter::{Eval, Term};
use lamb::types::Infer;

fn infer_and_print(expr: &Expr<()>, label: &str) -> Result<()> {
    let mut infer = Infer::new();
    match infer.infer_expr(expr) {
        Ok(scheme) => {
            println!("{} : {}", label, scheme);
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("error: {}", error);
            }
            anyhow::bail!("type errors occurred")
        }
    }
}

fn main() -> Result<()> {
    infer_and_print(&Expr::lambda("x", Expr::ident("x")), "\\x. x")?;
    infer_and_print(
        &Expr::app(Expr::ident("identity"), Expr::ident("identity")),
        "identity identity",
    )?;

    let program = Expr::app(Expr::lambda("x", Expr::ident("x")), Expr::int(5));
    let term = Term::from_expr(&program);
    let mut eval = Eval::new();
    println!("{} => {}", term, eval.eval(&term));

    Ok(())
}
