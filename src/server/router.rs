use axum::{
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        about::AboutDto,
        api::JsonEnvelope,
        auth::{ChangePasswordDto, FlashMessageDto, LoginForm, LogoutUrlDto},
        browser::{BrowserNode, NodeResponseDto},
        mfa::{
            MfaMethodDto, MfaRegisterForm, MfaRegistrationViewDto, MfaValidateForm,
            MfaValidationViewDto,
        },
        preference::{PreferenceDto, PreferenceValueDto},
        server::{CreateServerDto, ServerDto, UpdateServerDto},
        server_group::{ServerGroupDto, ServerGroupListItemDto, ServerGroupPayloadDto},
    },
    server::{
        controller::{
            about, authenticate, browser, kerberos, mfa, oauth2, preference, server, server_group,
        },
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "pgconsole",
        description = "Catalog, authentication and browser tree API of the PostgreSQL console."
    ),
    paths(
        authenticate::login,
        authenticate::messages,
        authenticate::logout_url,
        authenticate::logout,
        authenticate::change_password,
        kerberos::login,
        kerberos::logout,
        oauth2::authorize,
        oauth2::logout,
        mfa::list_methods,
        mfa::validation_views,
        mfa::validate,
        mfa::registration_view,
        mfa::register,
        mfa::unregister,
        about::index,
        preference::get_preference,
        preference::set_preference,
        browser::get_nodes,
        server_group::list,
        server_group::properties,
        server_group::create,
        server_group::update,
        server_group::delete,
        server_group::nodes,
        server_group::node,
        server_group::not_applicable,
        server::list,
        server::properties,
        server::create,
        server::update,
        server::delete,
        server::nodes,
        server::node,
        server::children,
        server::clear_saved_password,
    ),
    components(schemas(
        JsonEnvelope,
        LoginForm,
        FlashMessageDto,
        LogoutUrlDto,
        ChangePasswordDto,
        MfaMethodDto,
        MfaValidateForm,
        MfaRegisterForm,
        MfaRegistrationViewDto,
        MfaValidationViewDto,
        AboutDto,
        PreferenceDto,
        PreferenceValueDto,
        BrowserNode,
        NodeResponseDto,
        ServerGroupDto,
        ServerGroupListItemDto,
        ServerGroupPayloadDto,
        ServerDto,
        CreateServerDto,
        UpdateServerDto,
    )),
    tags(
        (name = "authenticate", description = "Login, logout and password change"),
        (name = "kerberos", description = "Kerberos login via the fronting web server"),
        (name = "oauth2", description = "OAuth2 provider callback"),
        (name = "mfa", description = "Multi-factor authentication"),
        (name = "about", description = "About box"),
        (name = "preference", description = "User preferences"),
        (name = "browser", description = "Browser tree root"),
        (name = "server_group", description = "Server groups"),
        (name = "server", description = "Registered servers"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    let server_group_routes = Router::new()
        .route(
            "/obj/",
            get(server_group::list).post(server_group::create),
        )
        .route(
            "/obj/{gid}",
            get(server_group::properties)
                .put(server_group::update)
                .delete(server_group::delete),
        )
        .route("/nodes/", get(server_group::nodes))
        .route("/nodes/{gid}", get(server_group::node))
        .route("/{operation}/{gid}", get(server_group::not_applicable));

    let server_routes = Router::new()
        .route("/obj/{gid}/", get(server::list).post(server::create))
        .route(
            "/obj/{gid}/{sid}",
            get(server::properties)
                .put(server::update)
                .delete(server::delete),
        )
        .route("/nodes/{gid}/", get(server::nodes))
        .route("/nodes/{gid}/{sid}", get(server::node))
        .route("/children/{gid}/{sid}", get(server::children))
        .route(
            "/clear_saved_password/{gid}/{sid}",
            put(server::clear_saved_password),
        );

    Router::new()
        .route(
            "/authenticate/login",
            get(authenticate::login_page).post(authenticate::login),
        )
        .route("/authenticate/messages", get(authenticate::messages))
        .route("/authenticate/logout-url", get(authenticate::logout_url))
        .route("/logout", get(authenticate::logout))
        .route("/change_password", post(authenticate::change_password))
        .route("/kerberos/login", get(kerberos::login))
        .route("/kerberos/logout", get(kerberos::logout))
        .route("/oauth2/authorize", get(oauth2::authorize))
        .route("/oauth2/logout", get(oauth2::logout))
        .route("/mfa/", get(mfa::list_methods))
        .route("/mfa/validate", get(mfa::validation_views).post(mfa::validate))
        .route(
            "/mfa/register/{method}",
            get(mfa::registration_view).post(mfa::register),
        )
        .route("/mfa/{method}", delete(mfa::unregister))
        .route("/about/", get(about::index))
        .route(
            "/preferences/{module}/{name}",
            get(preference::get_preference).put(preference::set_preference),
        )
        .route("/browser/nodes/", get(browser::get_nodes))
        .nest("/browser/server_group", server_group_routes)
        .nest("/browser/server", server_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}
