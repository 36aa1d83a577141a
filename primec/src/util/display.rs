use crate::encode::{Address, Object};
use crate::grammer::ast::{Ast, FuncId};
use color_print::cprintln;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;
use tam::machine::CB;
use tam::Instruction;

pub fn signature(ast: &Ast, func: FuncId) -> String {
    let func = &ast.funcs[func];
    let params = func
        .params
        .iter()
        .map(|&param| {
            let param = &ast.vars[param];
            format!("{} {}", param.ty.name(), param.name)
        })
        .join(", ");
    match func.ret {
        Some(ret) => format!("({}) -> {}", params, ret.name()),
        None => format!("({})", params),
    }
}

pub fn print_code(ast: &Ast, object: &Object) {
    let heads: HashMap<i32, FuncId> = object
        .layout
        .funcs
        .iter()
        .map(|(&id, addr)| (addr.displacement, id))
        .collect();

    println!("+-[Code]-+------------------------------------------------------------------------");
    for (addr, inst) in (CB..).zip(&object.code) {
        if let Some(&id) = heads.get(&addr) {
            cprintln!(
                "+--------+ <green>{}</green> : {}",
                ast.funcs[id].name,
                signature(ast, id)
            );
        }
        cprintln!("| 0x{:04X} : {}", addr, inst.cformat());
    }
    println!("+--------+------------------------------------------------------------------------");
}

/// Serializable code listing.
#[derive(Debug, Serialize)]
pub struct Listing {
    pub functions: Vec<FuncEntry>,
    pub variables: Vec<VarEntry>,
    pub code: Vec<Line>,
}

#[derive(Debug, Serialize)]
pub struct FuncEntry {
    pub name: String,
    pub signature: String,
    pub address: Address,
}

#[derive(Debug, Serialize)]
pub struct VarEntry {
    pub function: String,
    pub name: String,
    pub ty: &'static str,
    pub address: Address,
}

#[derive(Debug, Serialize)]
pub struct Line {
    pub address: i32,
    pub text: String,
    pub inst: Instruction,
}

impl Listing {
    pub fn new(ast: &Ast, object: &Object) -> Self {
        let functions = ast
            .funcs
            .iter_enumerated()
            .filter_map(|(id, func)| {
                let address = *object.layout.funcs.get(&id)?;
                Some(FuncEntry {
                    name: func.name.clone(),
                    signature: signature(ast, id),
                    address,
                })
            })
            .collect();

        let variables = ast
            .funcs
            .iter_enumerated()
            .flat_map(|(id, func)| {
                ast.declared_vars(id).into_iter().filter_map(move |var| {
                    let address = *object.layout.vars.get(&var)?;
                    Some(VarEntry {
                        function: func.name.clone(),
                        name: ast.vars[var].name.clone(),
                        ty: ast.vars[var].ty.name(),
                        address,
                    })
                })
            })
            .collect();

        let code = (CB..)
            .zip(&object.code)
            .map(|(address, &inst)| Line {
                address,
                text: inst.to_string(),
                inst,
            })
            .collect();

        Listing {
            functions,
            variables,
            code,
        }
    }
}
