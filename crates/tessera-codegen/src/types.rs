//! Emission of the Ruby classes and modules that represent the model types:
//! the class declaration for a struct, the accessor pair for each member,
//! the keyed constructor, and the constant module for each enum.

use tessera_model::{ElementType, EnumType, MemberType, StructMember, StructType};

use crate::buffer::Buffer;
use crate::names;

/// Writes the `class X < Base` line for `struct_type`, falling back to the
/// root base class when no base is declared.
pub(crate) fn generate_class_declaration(buffer: &mut Buffer, struct_type: &StructType) {
    let class = names::class_name(&struct_type.name);
    let base = match &struct_type.base {
        Some(base) => names::class_name(base),
        None => names::STRUCT_BASE.to_string(),
    };
    buffer.add_line(&format!("class {class} < {base}"));
}

/// Writes the full class body for `struct_type`: accessors for the declared
/// attributes and links (each group sorted by name), then a constructor that
/// takes one keyed `opts` hash, forwards it to the base constructor and
/// assigns every declared member from its key.
pub(crate) fn generate_struct(buffer: &mut Buffer, struct_type: &StructType) {
    generate_class_declaration(buffer, struct_type);
    buffer.blank_line();

    for member in sorted_by_name(&struct_type.attributes) {
        generate_member(buffer, member);
    }
    for member in sorted_by_name(&struct_type.links) {
        generate_member(buffer, member);
    }

    buffer.add_line("def initialize(opts = {})");
    buffer.add_line("super(opts)");
    let mut properties: Vec<String> = struct_type
        .attributes
        .iter()
        .chain(&struct_type.links)
        .map(|member| names::member_name(&member.name))
        .collect();
    properties.sort();
    for property in properties {
        buffer.add_line(&format!("self.{property} = opts[:{property}]"));
    }
    buffer.add_line("end");
    buffer.blank_line();

    buffer.add_line("end");
    buffer.blank_line();
}

/// Writes the module of constants for `enum_type`. Each value becomes one
/// constant, named in constant style and valued by its property-style name.
pub(crate) fn generate_enum(buffer: &mut Buffer, enum_type: &EnumType) {
    let module = names::class_name(&enum_type.name);
    buffer.begin_module(&module);
    for value in &enum_type.values {
        let constant = names::constant_name(&value.name);
        let literal = names::member_name(&value.name);
        buffer.add_line(&format!("{constant} = '{literal}'"));
    }
    buffer.end_module(&module);
    buffer.blank_line();
}

fn sorted_by_name(members: &[StructMember]) -> Vec<&StructMember> {
    let mut sorted: Vec<&StructMember> = members.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

fn generate_member(buffer: &mut Buffer, member: &StructMember) {
    generate_getter(buffer, member);
    generate_setter(buffer, member);
}

fn generate_getter(buffer: &mut Buffer, member: &StructMember) {
    let property = names::member_name(&member.name);

    match &member.member_type {
        MemberType::Primitive(kind) => {
            doc(buffer, &format!("Returns the {} value.", kind.ruby_name()));
        }
        MemberType::Enum(name) | MemberType::Struct(name) => {
            doc(
                buffer,
                &format!("Returns the {} value.", names::class_name(name)),
            );
        }
        MemberType::List(element) => {
            doc(
                buffer,
                &format!(
                    "Returns an array of objects of type {}.",
                    element_doc_name(element)
                ),
            );
        }
    }

    buffer.add_line(&format!("def {property}"));
    buffer.add_line(&format!("return @{property}"));
    buffer.add_line("end");
    buffer.blank_line();
}

fn generate_setter(buffer: &mut Buffer, member: &StructMember) {
    let property = names::member_name(&member.name);

    match &member.member_type {
        MemberType::Primitive(kind) => {
            doc(buffer, &format!("Sets the {} value.", kind.ruby_name()));
            buffer.add_line(&format!("def {property}=(value)"));
            buffer.add_line(&format!("@{property} = value"));
            buffer.add_line("end");
        }
        MemberType::Enum(name) => {
            // Plain field write, so a declarative writer is enough.
            doc(
                buffer,
                &format!("Sets the {} value.", names::class_name(name)),
            );
            buffer.add_line(&format!("attr_writer :{property}"));
        }
        MemberType::Struct(name) => {
            let class = names::class_name(name);
            buffer.add_line("##");
            buffer.add_line(&format!("# Sets the {class} value."));
            buffer.add_line("#");
            buffer.add_line(&format!(
                "# The `object` can be an instance of {class} or a hash."
            ));
            buffer.add_line("# If it is a hash then a new instance will be created passing the hash as the ");
            buffer.add_line("# `opts` parameter to the constructor.");
            buffer.add_line("#");
            buffer.add_line(&format!("def {property}=(object)"));
            buffer.add_line("if object.is_a?(Hash)");
            buffer.add_line(&format!("object = {class}.new(object)"));
            buffer.add_line("end");
            buffer.add_line(&format!("@{property} = object"));
            buffer.add_line("end");
        }
        MemberType::List(element) => match element {
            ElementType::Primitive(kind) => {
                doc(buffer, &format!("Sets the {} values.", kind.ruby_name()));
                generate_plain_list_setter(buffer, &property);
            }
            ElementType::Enum(name) => {
                doc(
                    buffer,
                    &format!("Sets the {} values.", names::class_name(name)),
                );
                generate_plain_list_setter(buffer, &property);
            }
            ElementType::Struct(name) => {
                let class = names::class_name(name);
                doc(
                    buffer,
                    &format!("Sets the values from a list or array of objects of type {class}."),
                );
                buffer.add_line(&format!("def {property}=(list)"));
                buffer.add_line("if list.class == Array");
                buffer.add_line("list = List.new(list)");
                buffer.add_line("list.each_with_index do |value, index|");
                buffer.add_line("if value.is_a?(Hash)");
                buffer.add_line(&format!("list[index] = {class}.new(value)"));
                buffer.add_line("end");
                buffer.add_line("end");
                buffer.add_line("end");
                buffer.add_line(&format!("@{property} = list"));
                buffer.add_line("end");
            }
        },
    }

    buffer.blank_line();
}

fn generate_plain_list_setter(buffer: &mut Buffer, property: &str) {
    buffer.add_line(&format!("def {property}=(list)"));
    buffer.add_line(&format!("@{property} = list"));
    buffer.add_line("end");
}

fn element_doc_name(element: &ElementType) -> String {
    match element {
        ElementType::Primitive(kind) => kind.ruby_name().to_string(),
        ElementType::Enum(name) | ElementType::Struct(name) => names::class_name(name),
    }
}

fn doc(buffer: &mut Buffer, text: &str) {
    buffer.add_line("##");
    buffer.add_line(&format!("# {text}"));
    buffer.add_line("#");
}
