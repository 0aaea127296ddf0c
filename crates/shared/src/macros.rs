// crates/shared/src/macros.rs

#[macro_export]
macro_rules! register_toolbelt {
    (
        $toolbelt_type:ty {
            description: $toolbelt_desc:literal,
            tools: {
                $(
                    $name:literal => $method:ident {
                        description: $desc:literal,
                        params: [$($p_name:literal: $p_type:literal => $p_desc:literal),* $(,)?]
                        $(, optional: [$($o_name:literal: $o_type:literal => $o_desc:literal),* $(,)?])?
                    }
                ),* $(,)?
            }
        }
    ) => {
        use once_cell::sync::Lazy;

        pub static INSTANCE: Lazy<$toolbelt_type> = Lazy::new(<$toolbelt_type>::default);

        $(
            paste::paste! {
                pub fn [<$method _handler>](args: &serde_json::Value) -> anyhow::Result<String> {
                    INSTANCE.$method(args)
                }
            }
        )*

        paste::paste! {
            pub static TOOL_ENTRIES: &[(&str, $crate::schemas::ToolHandler)] = &[
                $(($name, [<$method _handler>])),*
            ];
        }

        pub static TOOL_SCHEMAS: Lazy<Vec<$crate::schemas::ToolSchema>> = Lazy::new(|| vec![
            $(
                $crate::schemas::ToolSchema {
                    name: $name,
                    description: $desc,
                    parameters: {
                        #[allow(unused_mut)]
                        let mut params = vec![
                            $(
                                $crate::schemas::ParameterSchema {
                                    name: $p_name,
                                    type_name: $p_type,
                                    description: $p_desc,
                                    required: true,
                                }
                            ),*
                        ];
                        $(
                            params.extend_from_slice(&[
                                $(
                                    $crate::schemas::ParameterSchema {
                                        name: $o_name,
                                        type_name: $o_type,
                                        description: $o_desc,
                                        required: false,
                                    }
                                ),*
                            ]);
                        )?
                        params
                    },
                }
            ),*
        ]);
    };
}
