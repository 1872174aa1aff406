use log::info;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::auth::AuthContext;
use crate::components::{bind, input_value, notice_view, page_shell, ConfirmModal, Notice, PasswordInput};
use crate::error::ValidationError;
use crate::models::{is_gmail_address, Editor, EditorForm, EditorUpdate};
use crate::pages::{failure, NavProps, CELL, INPUT_CLASS, PRIMARY_BUTTON, TABLE_CLASS};
use crate::route::Page;

const DUPLICATE_EMAIL: &str = "Editor with duplicate email cannot be saved";

fn validate_update(update: &EditorUpdate) -> Result<EditorUpdate, ValidationError> {
    let trimmed = EditorUpdate {
        name: update.name.trim().to_string(),
        email: update.email.trim().to_string(),
    };
    if trimmed.name.is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    if !is_gmail_address(&trimmed.email) {
        return Err(ValidationError::new("Invalid email format (must be @gmail.com)"));
    }
    Ok(trimmed)
}

#[derive(Properties, PartialEq)]
pub struct EditorFormProps {
    /// Receives the created editor when the backend echoes it back.
    pub on_added: Callback<Option<Editor>>,
}

#[function_component(AddEditorForm)]
pub fn add_editor_form(props: &EditorFormProps) -> Html {
    let auth = use_context::<AuthContext>();
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let notice = use_state(|| None::<Notice>);
    let saving = use_state(|| false);

    let on_submit = {
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let notice = notice.clone();
        let saving = saving.clone();
        let on_added = props.on_added.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(auth) = auth.clone() else { return };
            let form = EditorForm {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            if let Err(err) = form.validate() {
                notice.set(Some(Notice::error(err.to_string())));
                return;
            }

            saving.set(true);
            notice.set(None);
            let name = name.clone();
            let email = email.clone();
            let password = password.clone();
            let notice = notice.clone();
            let saving = saving.clone();
            let on_added = on_added.clone();
            spawn_local(async move {
                match api::add_editor(&form).await {
                    Ok(created) => {
                        info!("editor {} added", form.email);
                        name.set(String::new());
                        email.set(String::new());
                        password.set(String::new());
                        notice.set(Some(Notice::success("Editor added successfully")));
                        on_added.emit(created);
                    }
                    Err(err) => {
                        let shown = failure(&auth, &err, "Failed to add editor");
                        notice.set(Some(if err.is_duplicate_key() {
                            Notice::error(DUPLICATE_EMAIL)
                        } else {
                            shown
                        }));
                    }
                }
                saving.set(false);
            });
        })
    };

    html! {
        <form class="space-y-4" onsubmit={on_submit}>
            <input class={INPUT_CLASS} placeholder="Name" value={(*name).clone()} oninput={bind(&name)} />
            <input type="email" class={INPUT_CLASS} placeholder="Email" value={(*email).clone()} oninput={bind(&email)} />
            <PasswordInput value={(*password).clone()} oninput={bind(&password)} />
            <button type="submit" class={classes!(PRIMARY_BUTTON, "w-full")} disabled={*saving}>
                { if *saving { "Saving..." } else { "Add Editor" } }
            </button>
            { notice_view(&notice) }
        </form>
    }
}

#[function_component(AddEditorPage)]
pub fn add_editor_page(props: &NavProps) -> Html {
    let on_added = props.on_navigate.reform(|_: Option<Editor>| Page::Editors);
    page_shell(
        "Add Editor",
        html! {},
        html! {
            <div class="bg-card p-6 rounded-lg shadow-sm border border-border max-w-md">
                <AddEditorForm {on_added} />
            </div>
        },
    )
}

#[function_component(EditorsPage)]
pub fn editors_page() -> Html {
    let auth = use_context::<AuthContext>();
    let editors = use_state(Vec::<Editor>::new);
    let loading = use_state(|| true);
    let editing = use_state(|| None::<String>);
    let edit = use_state(EditorUpdate::default);
    let pending_delete = use_state(|| None::<Editor>);
    let show_add = use_state(|| false);
    let notice = use_state(|| None::<Notice>);

    let reload = {
        let auth = auth.clone();
        let editors = editors.clone();
        let loading = loading.clone();
        let notice = notice.clone();
        Callback::from(move |_: ()| {
            let Some(auth) = auth.clone() else { return };
            let editors = editors.clone();
            let loading = loading.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match api::fetch_editors().await {
                    Ok(list) => editors.set(list),
                    Err(err) => notice.set(Some(failure(&auth, &err, "Failed to load editors"))),
                }
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with_deps(
            move |_| {
                reload.emit(());
                || ()
            },
            (),
        );
    }

    let on_added = {
        let editors = editors.clone();
        let show_add = show_add.clone();
        Callback::from(move |created: Option<Editor>| {
            match created {
                Some(editor) => {
                    let mut next = (*editors).clone();
                    next.push(editor);
                    editors.set(next);
                }
                None => reload.emit(()),
            }
            show_add.set(false);
        })
    };

    let on_save = {
        let auth = auth.clone();
        let editors = editors.clone();
        let editing = editing.clone();
        let edit = edit.clone();
        let notice = notice.clone();
        Callback::from(move |id: String| {
            let Some(auth) = auth.clone() else { return };
            let update = match validate_update(&edit) {
                Ok(update) => update,
                Err(err) => {
                    notice.set(Some(Notice::error(err.to_string())));
                    return;
                }
            };
            let editors = editors.clone();
            let editing = editing.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match api::update_editor(&id, &update).await {
                    Ok(()) => {
                        let next = editors
                            .iter()
                            .map(|editor| {
                                if editor.id == id {
                                    Editor {
                                        name: update.name.clone(),
                                        email: update.email.clone(),
                                        ..editor.clone()
                                    }
                                } else {
                                    editor.clone()
                                }
                            })
                            .collect();
                        editors.set(next);
                        editing.set(None);
                        notice.set(Some(Notice::success("Editor updated successfully")));
                    }
                    Err(err) => {
                        let shown = failure(&auth, &err, "Failed to update editor");
                        notice.set(Some(if err.is_duplicate_key() {
                            Notice::error(DUPLICATE_EMAIL)
                        } else {
                            shown
                        }));
                    }
                }
            });
        })
    };

    let on_confirm_delete = {
        let editors = editors.clone();
        let pending_delete = pending_delete.clone();
        let notice = notice.clone();
        Callback::from(move |_: ()| {
            let Some(auth) = auth.clone() else { return };
            let Some(target) = (*pending_delete).clone() else { return };
            pending_delete.set(None);
            let editors = editors.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match api::delete_editor(&target.email).await {
                    Ok(()) => {
                        editors.set(editors.iter().filter(|e| e.email != target.email).cloned().collect());
                        info!("editor {} deleted", target.email);
                        notice.set(Some(Notice::success("Editor deleted successfully")));
                    }
                    Err(err) => notice.set(Some(failure(&auth, &err, "Failed to delete editor"))),
                }
            });
        })
    };

    let on_cancel_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_: ()| pending_delete.set(None))
    };

    let toggle_add = {
        let show_add = show_add.clone();
        Callback::from(move |_: MouseEvent| show_add.set(!*show_add))
    };

    let rows = editors
        .iter()
        .enumerate()
        .map(|(row, editor)| {
            let is_editing = editing.as_deref() == Some(editor.id.as_str());
            if is_editing {
                let on_name = {
                    let edit = edit.clone();
                    Callback::from(move |e: InputEvent| {
                        edit.set(EditorUpdate { name: input_value(&e), ..(*edit).clone() })
                    })
                };
                let on_email = {
                    let edit = edit.clone();
                    Callback::from(move |e: InputEvent| {
                        edit.set(EditorUpdate { email: input_value(&e), ..(*edit).clone() })
                    })
                };
                let save = {
                    let on_save = on_save.clone();
                    let id = editor.id.clone();
                    Callback::from(move |_: MouseEvent| on_save.emit(id.clone()))
                };
                let cancel = {
                    let editing = editing.clone();
                    Callback::from(move |_: MouseEvent| editing.set(None))
                };
                html! {
                    <tr key={editor.id.clone()}>
                        <td class={CELL}>{ row + 1 }</td>
                        <td class={CELL}><input class={INPUT_CLASS} value={edit.name.clone()} oninput={on_name} /></td>
                        <td class={CELL}><input class={INPUT_CLASS} value={edit.email.clone()} oninput={on_email} /></td>
                        <td class={CELL}>
                            <button class="bg-green-600 text-white px-3 py-1 rounded mr-2" onclick={save}>{"Save"}</button>
                            <button class="bg-gray-500 text-white px-3 py-1 rounded" onclick={cancel}>{"Cancel"}</button>
                        </td>
                    </tr>
                }
            } else {
                let start_edit = {
                    let editing = editing.clone();
                    let edit = edit.clone();
                    let editor = editor.clone();
                    Callback::from(move |_: MouseEvent| {
                        edit.set(EditorUpdate {
                            name: editor.name.clone(),
                            email: editor.email.clone(),
                        });
                        editing.set(Some(editor.id.clone()));
                    })
                };
                let ask_delete = {
                    let pending_delete = pending_delete.clone();
                    let editor = editor.clone();
                    Callback::from(move |_: MouseEvent| pending_delete.set(Some(editor.clone())))
                };
                html! {
                    <tr key={editor.id.clone()}>
                        <td class={CELL}>{ row + 1 }</td>
                        <td class={CELL}>{ editor.name.clone() }</td>
                        <td class={CELL}>{ editor.email.clone() }</td>
                        <td class={CELL}>
                            <button class="bg-yellow-500 text-white px-3 py-1 rounded mr-2" onclick={start_edit}>{"Edit"}</button>
                            <button class="bg-red-600 text-white px-3 py-1 rounded" onclick={ask_delete}>{"Delete"}</button>
                        </td>
                    </tr>
                }
            }
        })
        .collect::<Html>();

    let delete_message = pending_delete
        .as_ref()
        .map(|e| format!("Are you sure you want to delete {}?", e.name))
        .unwrap_or_default();

    page_shell(
        "Editors",
        html! {
            <button class={PRIMARY_BUTTON} onclick={toggle_add}>
                { if *show_add { "Close" } else { "+ Add Editor" } }
            </button>
        },
        html! {
            <>
                <ConfirmModal
                    open={pending_delete.is_some()}
                    message={delete_message}
                    on_cancel={on_cancel_delete}
                    on_confirm={on_confirm_delete}
                />
                if *show_add {
                    <div class="bg-card p-6 rounded-lg shadow-sm border border-border max-w-md">
                        <AddEditorForm {on_added} />
                    </div>
                }
                { notice_view(&notice) }
                if *loading {
                    <p class="text-center text-muted-foreground">{"Loading..."}</p>
                } else if editors.is_empty() {
                    <p class="text-center text-muted-foreground">{"No editors found."}</p>
                } else {
                    <div class="overflow-x-auto">
                        <table class={TABLE_CLASS}>
                            <thead>
                                <tr class="bg-muted font-bold">
                                    <th class={CELL}>{"S.No"}</th>
                                    <th class={CELL}>{"Name"}</th>
                                    <th class={CELL}>{"Email"}</th>
                                    <th class={CELL}>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>{ rows }</tbody>
                        </table>
                    </div>
                }
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_is_trimmed_and_checked() {
        let update = EditorUpdate {
            name: "  Asha ".into(),
            email: " asha@gmail.com ".into(),
        };
        assert_eq!(
            validate_update(&update).unwrap(),
            EditorUpdate {
                name: "Asha".into(),
                email: "asha@gmail.com".into()
            }
        );

        let blank = EditorUpdate {
            name: " ".into(),
            ..update.clone()
        };
        assert_eq!(validate_update(&blank).unwrap_err().to_string(), "Name is required");

        let yahoo = EditorUpdate {
            email: "asha@yahoo.com".into(),
            ..update
        };
        assert!(validate_update(&yahoo).is_err());
    }
}
